use coinhunter_game::{CoinHunter, GameStatus};

#[cfg(target_family = "wasm")]
use crate::theme;

/// Title and prompt lines for the non-playing screens.
pub fn overlay_caption(status: GameStatus) -> Option<(&'static str, &'static str)> {
    match status {
        GameStatus::Start => Some(("COIN HUNTER ADVENTURE", "Press Enter to start")),
        GameStatus::Paused => Some(("PAUSED", "Press P to resume")),
        GameStatus::GameOver => Some(("GAME OVER", "Press Enter to retry")),
        GameStatus::LevelComplete => Some(("LEVEL CLEAR!", "Press Enter to play again")),
        GameStatus::Playing => None,
    }
}

/// The single-line HUD readout (hearts are drawn separately).
pub fn hud_text(game: &CoinHunter) -> String {
    format!(
        "SCORE {:06}   COINS {}   TIME {:>5.1}",
        game.score,
        game.coins_collected,
        game.elapsed_secs()
    )
}

/// Invulnerable players blink at ~7.5 Hz; this decides the hidden phase.
pub fn player_hidden(game: &CoinHunter) -> bool {
    game.player.is_invulnerable() && game.player.invuln_frames % 8 < 4
}

#[cfg(target_family = "wasm")]
pub fn draw(ctx: &web_sys::CanvasRenderingContext2d, game: &CoinHunter) {
    use coinhunter_game::camera::{VIEW_HEIGHT, VIEW_WIDTH};
    use coinhunter_game::entities::{COIN_SIZE, EnemyKind, flag_rect};

    let cam = game.camera.x as f64;
    let physics = &game.config().physics;

    ctx.set_fill_style_str(theme::SKY);
    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

    // Platforms: body plus a grassy top edge.
    for platform in &game.level().platforms {
        ctx.set_fill_style_str(theme::PLATFORM);
        ctx.fill_rect(
            platform.x as f64 - cam,
            platform.y as f64,
            platform.w as f64,
            platform.h as f64,
        );
        ctx.set_fill_style_str(theme::PLATFORM_TOP);
        ctx.fill_rect(platform.x as f64 - cam, platform.y as f64, platform.w as f64, 4.0);
    }

    for spring in &game.springs {
        let rect = spring.rect();
        ctx.set_fill_style_str(theme::SPRING);
        if spring.triggered {
            // A used spring sits compressed.
            ctx.fill_rect(
                rect.x as f64 - cam,
                (rect.y + rect.h / 2.0) as f64,
                rect.w as f64,
                (rect.h / 2.0) as f64,
            );
        } else {
            ctx.fill_rect(rect.x as f64 - cam, rect.y as f64, rect.w as f64, rect.h as f64);
        }
    }

    ctx.set_fill_style_str(theme::COIN);
    for coin in &game.coins {
        if coin.collected {
            continue;
        }
        let r = (COIN_SIZE / 2.0) as f64;
        ctx.begin_path();
        let _ = ctx.arc(
            coin.x as f64 + r - cam,
            coin.y as f64 + r,
            r,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
    }

    for enemy in &game.enemies {
        if !enemy.alive {
            continue;
        }
        let rect = enemy.rect();
        let color = match enemy.kind {
            EnemyKind::Slime => theme::SLIME,
            EnemyKind::Bird => theme::BIRD,
        };
        ctx.set_fill_style_str(color);
        ctx.fill_rect(rect.x as f64 - cam, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    // Goal flag: pole plus cloth.
    let flag = flag_rect(&game.level().flag);
    ctx.set_fill_style_str(theme::FLAG_POLE);
    ctx.fill_rect(flag.x as f64 - cam, flag.y as f64, 4.0, flag.h as f64);
    ctx.set_fill_style_str(theme::FLAG_CLOTH);
    ctx.fill_rect(flag.x as f64 + 4.0 - cam, flag.y as f64, (flag.w - 4.0) as f64, 14.0);

    if !player_hidden(game) {
        ctx.set_fill_style_str(theme::PLAYER);
        ctx.fill_rect(
            game.player.x as f64 - cam,
            game.player.y as f64,
            physics.player_width as f64,
            physics.player_height as f64,
        );
    }

    draw_hud(ctx, game);

    if let Some((title, prompt)) = overlay_caption(game.status) {
        ctx.set_fill_style_str(theme::OVERLAY_SCRIM);
        ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        ctx.set_fill_style_str(theme::HUD_TEXT);
        ctx.set_text_align("center");
        ctx.set_font("bold 36px monospace");
        let _ = ctx.fill_text(title, (VIEW_WIDTH / 2.0) as f64, (VIEW_HEIGHT / 2.0 - 16.0) as f64);
        ctx.set_font("18px monospace");
        let _ = ctx.fill_text(prompt, (VIEW_WIDTH / 2.0) as f64, (VIEW_HEIGHT / 2.0 + 24.0) as f64);
        ctx.set_text_align("left");
    }
}

#[cfg(target_family = "wasm")]
fn draw_hud(ctx: &web_sys::CanvasRenderingContext2d, game: &CoinHunter) {
    ctx.set_fill_style_str(theme::HUD_TEXT);
    ctx.set_font("16px monospace");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&hud_text(game), 12.0, 24.0);

    // Health as hearts, right-aligned.
    let max = game.config().physics.max_health;
    for i in 0..max {
        let color = if i < game.player.health {
            theme::HEART
        } else {
            theme::HEART_EMPTY
        };
        ctx.set_fill_style_str(color);
        let x = coinhunter_game::camera::VIEW_WIDTH as f64 - 28.0 * (max - i) as f64;
        ctx.fill_rect(x, 12.0, 20.0, 18.0);
    }
}
