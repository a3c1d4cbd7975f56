#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Publishes the special weapon cooldown to the presentation layer.

use std::time::Duration;

use asari_stg_core::Event;

/// Pure system that republishes the remaining special weapon cooldown every tick.
#[derive(Debug, Default)]
pub struct CooldownReporter {
    last_published: Option<Duration>,
}

impl CooldownReporter {
    /// Creates a reporter that has not published anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remaining cooldown carried by the last notification, if any.
    #[must_use]
    pub fn last_published(&self) -> Option<Duration> {
        self.last_published
    }

    /// Emits `Event::CooldownRemaining` when the batch advanced time or fired the weapon.
    ///
    /// Paused frames carry neither, so the published value freezes together
    /// with the logical clock.
    pub fn handle(&mut self, events: &[Event], remaining: Duration, out: &mut Vec<Event>) {
        let refresh = events.iter().any(|event| {
            matches!(
                event,
                Event::TimeAdvanced { .. } | Event::SpecialActivated { .. }
            )
        });
        if !refresh {
            return;
        }

        self.last_published = Some(remaining);
        out.push(Event::CooldownRemaining {
            seconds: remaining.as_secs_f32(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_without_time_or_activation() {
        let mut reporter = CooldownReporter::new();
        let mut out = Vec::new();
        reporter.handle(
            &[Event::ScoreDelta { points: 10 }],
            Duration::from_secs(3),
            &mut out,
        );
        assert!(out.is_empty());
        assert_eq!(reporter.last_published(), None);
    }

    #[test]
    fn activation_publishes_full_cooldown() {
        let mut reporter = CooldownReporter::new();
        let mut out = Vec::new();
        reporter.handle(
            &[Event::SpecialActivated { at: Duration::ZERO }],
            Duration::from_secs(10),
            &mut out,
        );
        assert_eq!(out, vec![Event::CooldownRemaining { seconds: 10.0 }]);
    }
}
