#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heads-up display model driven exclusively by gameplay notifications.
//!
//! [`Hud`] never looks at the world. It folds the notification subset of the
//! event stream into labels, the boss health bar and the result banner, which
//! rendering backends or the terminal adapter then draw.

use asari_stg_core::Event;
use glam::Vec2;

const LABEL_MARGIN: f32 = 10.0;
const SPECIAL_LABEL_Y: f32 = 40.0;
const BOSS_LABEL_Y: f32 = 30.0;
const BOSS_BAR_WIDTH_RATIO: f32 = 0.8;
const BOSS_BAR_HEIGHT: f32 = 20.0;
const BOSS_BAR_TOP: f32 = 55.0;
const BANNER_TITLE_OFFSET: f32 = 100.0;

/// RGBA color used when presenting the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Plain text shown in the score label and on the result screen.
pub const WHITE: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
/// Ready special weapon and the clear title.
pub const GREEN: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
/// Cooling special weapon, the boss bar fill and the game-over title.
pub const RED: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
/// Empty part of the boss bar.
pub const DARK_RED: Color = Color::from_rgb_u8(0x80, 0x00, 0x00);

/// Text placed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Rendered text.
    pub text: String,
    /// Anchor of the text in screen space.
    pub position: Vec2,
    /// Fill color.
    pub color: Color,
}

impl TextLabel {
    fn new(text: impl Into<String>, position: Vec2, color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            color,
        }
    }
}

/// Boss health bar geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossHpBar {
    /// Top-left corner of the bar.
    pub origin: Vec2,
    /// Full extent of the bar.
    pub size: Vec2,
    /// Portion of the bar that is filled, in 0.0..=1.0.
    pub fill: f32,
}

impl BossHpBar {
    /// Extent of the filled part of the bar.
    #[must_use]
    pub fn filled_size(&self) -> Vec2 {
        Vec2::new(self.size.x * self.fill, self.size.y)
    }
}

/// Title and score shown when the run ends.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultBanner {
    /// `GAME CLEAR!` or `GAME OVER`.
    pub title: TextLabel,
    /// `Final Score: N`.
    pub score: TextLabel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BossHealth {
    hp: u32,
    max_hp: u32,
}

/// Presentation state accumulated from notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    screen: Vec2,
    score: u32,
    cooldown_seconds: f32,
    boss: Option<BossHealth>,
    outcome: Option<(bool, u32)>,
}

impl Hud {
    /// Creates a HUD for a screen of the given size.
    #[must_use]
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen: Vec2::new(screen_width, screen_height),
            score: 0,
            cooldown_seconds: 0.0,
            boss: None,
            outcome: None,
        }
    }

    /// Folds the notifications contained in `events` into the HUD.
    ///
    /// Lifecycle events that are not notifications are skipped.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events.iter().filter(|event| event.is_notification()) {
            match *event {
                Event::ScoreDelta { points } => self.score = self.score.saturating_add(points),
                Event::CooldownRemaining { seconds } => self.cooldown_seconds = seconds.max(0.0),
                Event::BossPhaseStarted { max_hp } => {
                    self.boss = Some(BossHealth { hp: max_hp, max_hp });
                }
                Event::BossHpChanged { hp } => {
                    if let Some(boss) = self.boss.as_mut() {
                        boss.hp = hp.min(boss.max_hp);
                    }
                }
                Event::RunEnded {
                    victory,
                    final_score,
                } => {
                    if self.outcome.is_none() {
                        self.outcome = Some((victory, final_score));
                    }
                }
                _ => {}
            }
        }
    }

    /// Score accumulated from notifications.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// `Score: N` label in the top-left corner.
    #[must_use]
    pub fn score_label(&self) -> TextLabel {
        TextLabel::new(
            format!("Score: {}", self.score),
            Vec2::splat(LABEL_MARGIN),
            WHITE,
        )
    }

    /// Special weapon readiness label below the score.
    #[must_use]
    pub fn special_label(&self) -> TextLabel {
        let position = Vec2::new(LABEL_MARGIN, SPECIAL_LABEL_Y);
        if self.cooldown_seconds > 0.0 {
            TextLabel::new(
                format!("SP Cooldown: {:.1}s", self.cooldown_seconds),
                position,
                RED,
            )
        } else {
            TextLabel::new("SP Ready!", position, GREEN)
        }
    }

    /// `BOSS HP` caption, present once the boss arrived.
    #[must_use]
    pub fn boss_label(&self) -> Option<TextLabel> {
        self.boss.map(|_| {
            TextLabel::new(
                "BOSS HP",
                Vec2::new(self.screen.x / 2.0, BOSS_LABEL_Y),
                RED,
            )
        })
    }

    /// Boss health bar, present once the boss arrived.
    #[must_use]
    pub fn boss_bar(&self) -> Option<BossHpBar> {
        let boss = self.boss?;
        let size = Vec2::new(self.screen.x * BOSS_BAR_WIDTH_RATIO, BOSS_BAR_HEIGHT);
        let fill = if boss.max_hp == 0 {
            0.0
        } else {
            (boss.hp as f32 / boss.max_hp as f32).clamp(0.0, 1.0)
        };
        Some(BossHpBar {
            origin: Vec2::new((self.screen.x - size.x) / 2.0, BOSS_BAR_TOP),
            size,
            fill,
        })
    }

    /// Result banner, present once the run ended.
    #[must_use]
    pub fn result_banner(&self) -> Option<ResultBanner> {
        let (victory, final_score) = self.outcome?;
        let centre = self.screen / 2.0;
        let (title, color) = if victory {
            ("GAME CLEAR!", GREEN)
        } else {
            ("GAME OVER", RED)
        };
        Some(ResultBanner {
            title: TextLabel::new(title, centre - Vec2::new(0.0, BANNER_TITLE_OFFSET), color),
            score: TextLabel::new(format!("Final Score: {final_score}"), centre, WHITE),
        })
    }

    /// Renders the HUD as plain text lines, in drawing order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if let Some(banner) = self.result_banner() {
            return vec![banner.title.text, banner.score.text];
        }

        let mut lines = vec![self.score_label().text, self.special_label().text];
        if let (Some(label), Some(bar)) = (self.boss_label(), self.boss_bar()) {
            lines.push(format!("{} {}", label.text, gauge(bar.fill)));
        }
        lines
    }
}

fn gauge(fill: f32) -> String {
    const CELLS: usize = 20;
    let filled = ((fill * CELLS as f32).ceil() as usize).min(CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(CELLS - filled))
}
