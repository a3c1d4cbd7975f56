//! Scripted boss movement: a glide in from the right edge followed by an
//! endless vertical sway.

use std::{f32::consts::PI, time::Duration};

use asari_stg_core::{Arena, WorldPoint};

const ENTRY_OFFSET: f32 = 100.0;
const HOLD_INSET: f32 = 150.0;
const SWAY_INSET: f32 = 150.0;
const ENTRY_DURATION: Duration = Duration::from_millis(2_000);
const SWAY_LEG: Duration = Duration::from_millis(3_000);

/// Position of the boss `elapsed` after it appeared.
pub(crate) fn position(elapsed: Duration, arena: &Arena) -> WorldPoint {
    let start_x = arena.width() + ENTRY_OFFSET;
    let hold_x = arena.width() - HOLD_INSET;
    let centre_y = arena.height() / 2.0;

    if elapsed < ENTRY_DURATION {
        let progress = elapsed.as_secs_f32() / ENTRY_DURATION.as_secs_f32();
        let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
        return WorldPoint::new(start_x + (hold_x - start_x) * eased, centre_y);
    }

    let sway = (elapsed - ENTRY_DURATION).as_secs_f32();
    let leg = SWAY_LEG.as_secs_f32();
    let cycle = sway % (2.0 * leg);
    let progress = if cycle < leg {
        cycle / leg
    } else {
        (2.0 * leg - cycle) / leg
    };
    let eased = (1.0 - (PI * progress).cos()) / 2.0;
    let low_y = arena.height() - SWAY_INSET;
    WorldPoint::new(hold_x, centre_y + (low_y - centre_y) * eased)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glides_in_from_beyond_the_right_edge() {
        let arena = Arena::new(1_280.0, 720.0);
        assert_eq!(position(Duration::ZERO, &arena), WorldPoint::new(1_380.0, 360.0));
        assert_eq!(
            position(ENTRY_DURATION, &arena),
            WorldPoint::new(1_130.0, 360.0)
        );
    }

    #[test]
    fn sways_between_centre_and_lower_band() {
        let arena = Arena::new(1_280.0, 720.0);
        let bottom = position(ENTRY_DURATION + SWAY_LEG, &arena);
        assert!((bottom.y - 570.0).abs() < 1e-3);
        let back = position(ENTRY_DURATION + SWAY_LEG * 2, &arena);
        assert!((back.y - 360.0).abs() < 1e-3);
    }
}
