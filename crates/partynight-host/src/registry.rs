use std::collections::HashMap;

use partynight_core::feedback::SharedFeedback;
use partynight_core::game_registry::{GameDescriptor, GameKind};
use partynight_core::game_trait::PartyGame;
use partynight_core::rng::BoxedRng;

/// Builds an engine for a catalog entry. `None` when the descriptor does
/// not carry what the engine needs (a universal entry without a mode).
type GameFactory = fn(&GameDescriptor, BoxedRng, SharedFeedback) -> Option<Box<dyn PartyGame>>;

/// Maps engine kinds to factories. Only kinds whose crate feature is
/// enabled are registered.
pub struct GameRegistry {
    factories: HashMap<GameKind, GameFactory>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "tower")]
        self.factories.insert(GameKind::Tower, |_, rng, feedback| {
            Some(Box::new(partynight_tower::TowerGame::new(rng, feedback)))
        });
        #[cfg(feature = "fishing")]
        self.factories.insert(GameKind::Fishing, |_, rng, feedback| {
            Some(Box::new(partynight_fishing::FishingGame::new(rng, feedback)))
        });
        #[cfg(feature = "names")]
        self.factories.insert(GameKind::NameGame, |_, rng, feedback| {
            Some(Box::new(partynight_names::NameGame::new(rng, feedback)))
        });
        #[cfg(feature = "universal")]
        self.factories.insert(GameKind::Universal, |descriptor, rng, feedback| {
            let mode = descriptor.mode?;
            Some(Box::new(partynight_universal::UniversalGame::new(mode, rng, feedback)))
        });
    }

    /// Fresh engine for `descriptor`. Engines are never reused.
    pub fn create(
        &self,
        descriptor: &GameDescriptor,
        rng: BoxedRng,
        feedback: SharedFeedback,
    ) -> Option<Box<dyn PartyGame>> {
        let factory = self.factories.get(&descriptor.kind)?;
        factory(descriptor, rng, feedback)
    }

    pub fn supports(&self, kind: GameKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Return the number of registered engine kinds.
    pub fn available_games(&self) -> usize {
        self.factories.len()
    }
}
