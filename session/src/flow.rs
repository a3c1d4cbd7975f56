//! Scene flow between the title screen, the run and the result screens.

use asari_stg_core::{Difficulty, Event};
use tracing::debug;

/// Screen currently shown to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Difficulty selection.
    #[default]
    Title,
    /// A run is in progress.
    Playing {
        /// Difficulty of the run.
        difficulty: Difficulty,
    },
    /// The run is suspended behind the pause menu.
    Paused {
        /// Difficulty of the suspended run.
        difficulty: Difficulty,
    },
    /// The boss was defeated.
    GameClear {
        /// Score shown on the result screen, clear bonus included.
        final_score: u32,
    },
    /// The player was hit.
    GameOver {
        /// Score shown on the result screen.
        final_score: u32,
    },
}

/// Tracks which scene is active and rejects transitions the game does not offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneFlow {
    scene: Scene,
}

impl SceneFlow {
    /// Creates a flow positioned on the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene currently shown.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Starts a run from the title screen. Returns whether the transition happened.
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        if self.scene != Scene::Title {
            return false;
        }
        self.enter(Scene::Playing { difficulty })
    }

    /// Returns to the title screen from the pause menu or a result screen.
    pub fn return_to_title(&mut self) -> bool {
        match self.scene {
            Scene::Paused { .. } | Scene::GameClear { .. } | Scene::GameOver { .. } => {
                self.enter(Scene::Title)
            }
            Scene::Title | Scene::Playing { .. } => false,
        }
    }

    /// Follows pause and run-end facts emitted by the world.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            let next = match (event, self.scene) {
                (Event::PauseChanged { paused: true }, Scene::Playing { difficulty }) => {
                    Scene::Paused { difficulty }
                }
                (Event::PauseChanged { paused: false }, Scene::Paused { difficulty }) => {
                    Scene::Playing { difficulty }
                }
                (
                    Event::RunEnded {
                        victory,
                        final_score,
                    },
                    Scene::Playing { .. },
                ) => {
                    let final_score = *final_score;
                    if *victory {
                        Scene::GameClear { final_score }
                    } else {
                        Scene::GameOver { final_score }
                    }
                }
                _ => continue,
            };
            let _ = self.enter(next);
        }
    }

    fn enter(&mut self, scene: Scene) -> bool {
        debug!(from = ?self.scene, to = ?scene, "scene transition");
        self.scene = scene;
        true
    }
}
