//! Headless round logic: layout, drag tracking and slot matching.
//!
//! The round never touches rendering or audio. Operations take a [`GeometryProvider`] for
//! bounding boxes and return the [`RoundEvent`]s the presentation reacts to.

pub mod celebration;
pub mod config;
pub mod deferred;
pub mod geometry;
pub mod layout;

use core::time::Duration;

use bevy::math::{Rect, Vec2};
use fastrand::Rng;
use tracing::{debug, info};

use self::celebration::Celebration;
use self::config::{MatchRule, RoundConfig};
use self::deferred::{DeferredQueue, DeferredTask};
use self::geometry::{
    ElementId, GeometryError, GeometryProvider, centered_on, pixels_to_percent, touching,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// Fixed target in the central word outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: SlotId,
    pub character: char,
    /// Top-left corner in board pixels
    pub position: Vec2,
    pub filled: bool,
    pub win_highlight: bool,
}

impl Slot {
    pub const fn new(id: SlotId, character: char, position: Vec2) -> Self {
        Self {
            id,
            character,
            position,
            filled: false,
            win_highlight: false,
        }
    }
}

/// Draggable letter.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub character: char,
    /// Top-left corner in percent of the board, so it follows board resizes
    pub position: Vec2,
    /// Snapped and waiting to be removed
    pub fading: bool,
}

impl Tile {
    pub const fn new(id: TileId, character: char, position: Vec2) -> Self {
        Self {
            id,
            character,
            position,
            fading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub tile: TileId,
    /// Pointer position relative to the tile's top-left corner at grab time
    pub grab_offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AudioCue {
    TileShown,
    Drop,
    Win,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// The board had no size yet, layout retries on the next tick
    LayoutDeferred,
    TilesShown { word: String },
    DragStarted(TileId),
    DragCancelled(TileId),
    TileSnapped { tile: TileId, slot: SlotId },
    DropMissed(TileId),
    TileRemoved(TileId),
    Solved,
    CelebrationStarted,
    FireworksCleared,
    Reset,
}

impl RoundEvent {
    pub const fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            Self::TilesShown { .. } => Some(AudioCue::TileShown),
            Self::TileSnapped { .. } => Some(AudioCue::Drop),
            Self::Solved => Some(AudioCue::Win),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Round {
    config: RoundConfig,
    word: String,
    /// Word waiting for the board to be measured
    pending_word: Option<String>,
    board_size: Vec2,
    slots: Vec<Slot>,
    tiles: Vec<Tile>,
    drag: Option<DragSession>,
    celebration: Celebration,
    solved: bool,
    deferred: DeferredQueue,
}

impl Round {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub const fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub const fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    pub const fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Bumped by every layout and reset, identifies what the board currently shows.
    pub const fn generation(&self) -> u64 {
        self.deferred.generation()
    }

    pub const fn is_layout_pending(&self) -> bool {
        self.pending_word.is_some()
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id == id)
    }

    /// Starts a round for `word`, replacing whatever was on the board.
    ///
    /// Ignored while solved or for an empty word. On an unmeasured board the word is kept and
    /// laid out by the first [`Round::tick`] that can measure it.
    pub fn submit_word(
        &mut self,
        word: &str,
        geometry: &impl GeometryProvider,
        rng: &mut Rng,
    ) -> Vec<RoundEvent> {
        if self.solved {
            debug!("Ignoring submission of {word:?}, round is solved");
            return Vec::new();
        }
        if word.is_empty() {
            return Vec::new();
        }

        match geometry.board_rect() {
            Ok(board) => self.lay_out(word.to_owned(), board.size(), rng),
            Err(err) => {
                debug!("Deferring layout of {word:?}: {err}");
                self.pending_word = Some(word.to_owned());
                vec![RoundEvent::LayoutDeferred]
            }
        }
    }

    fn lay_out(&mut self, word: String, board_size: Vec2, rng: &mut Rng) -> Vec<RoundEvent> {
        let layout = layout::generate(&word, board_size, &self.config, rng);
        info!(
            "New round {word:?} on a {board_size} board ({} fallback placements)",
            layout.fallbacks
        );

        self.deferred.invalidate();
        self.pending_word = None;
        self.board_size = board_size;
        self.slots = layout.slots;
        self.tiles = layout.tiles;
        self.drag = None;
        self.celebration.clear();
        self.word.clone_from(&word);

        vec![RoundEvent::TilesShown { word }]
    }

    /// Topmost tile under `point` that can still be picked up.
    pub fn tile_at(&self, point: Vec2, geometry: &impl GeometryProvider) -> Option<TileId> {
        self.tiles
            .iter()
            .rev()
            .filter(|tile| !tile.fading)
            .find(|tile| {
                geometry
                    .element_rect(ElementId::Tile(tile.id))
                    .is_ok_and(|rect| rect.contains(point))
            })
            .map(|tile| tile.id)
    }

    /// Grabs the tile under the pointer. Ignored while solved, while another drag is active,
    /// or without pointer coordinates.
    pub fn pointer_down(
        &mut self,
        point: Option<Vec2>,
        geometry: &impl GeometryProvider,
    ) -> Vec<RoundEvent> {
        if self.solved || self.drag.is_some() {
            return Vec::new();
        }
        let Some(point) = point else {
            debug!("Ignoring pointer down without coordinates");
            return Vec::new();
        };
        let Some(tile) = self.tile_at(point, geometry) else {
            return Vec::new();
        };
        let Ok(rect) = geometry.element_rect(ElementId::Tile(tile)) else {
            return Vec::new();
        };

        self.drag = Some(DragSession {
            tile,
            grab_offset: point - rect.min,
        });
        vec![RoundEvent::DragStarted(tile)]
    }

    /// Moves the held tile so the grab point stays under the pointer.
    /// Returns whether a tile moved.
    pub fn pointer_move(&mut self, point: Option<Vec2>, geometry: &impl GeometryProvider) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        if self.solved {
            return false;
        }
        let Some(point) = point else {
            return false;
        };
        let board = match geometry.board_rect() {
            Ok(board) => board,
            Err(err) => {
                debug!("Ignoring pointer move: {err}");
                return false;
            }
        };

        let top_left = point - board.min - session.grab_offset;
        let Some(tile) = self.tile_mut(session.tile) else {
            return false;
        };
        tile.position = pixels_to_percent(top_left, board.size());
        true
    }

    /// Ends the drag without testing slots. The tile stays where it is.
    pub fn pointer_cancel(&mut self) -> Vec<RoundEvent> {
        self.drag
            .take()
            .map(|session| vec![RoundEvent::DragCancelled(session.tile)])
            .unwrap_or_default()
    }

    /// Drops the held tile: snaps it into the first open slot with the same character within
    /// reach, then checks whether the round is solved.
    pub fn pointer_up(&mut self, geometry: &impl GeometryProvider) -> Vec<RoundEvent> {
        let Some(session) = self.drag.take() else {
            return Vec::new();
        };
        if self.solved {
            return Vec::new();
        }

        let mut events = match self.resolve_drop(session.tile, geometry) {
            Ok(Some(slot)) => self.snap(session.tile, slot, geometry),
            Ok(None) => vec![RoundEvent::DropMissed(session.tile)],
            Err(err) => {
                debug!("Ignoring drop of {:?}: {err}", session.tile);
                Vec::new()
            }
        };

        if !self.slots.is_empty() && self.slots.iter().all(|slot| slot.filled) {
            events.extend(self.solve());
        }
        events
    }

    /// First open slot, in slot order, with the tile's character and within reach of it.
    fn resolve_drop(
        &self,
        tile: TileId,
        geometry: &impl GeometryProvider,
    ) -> Result<Option<SlotId>, GeometryError> {
        let character = self
            .tile(tile)
            .map(|tile| tile.character)
            .ok_or(GeometryError::UnknownElement(ElementId::Tile(tile)))?;
        let tile_rect = geometry.element_rect(ElementId::Tile(tile))?;
        let reaches = |slot_rect: Rect| match self.config.match_rule {
            MatchRule::Touching => touching(tile_rect, slot_rect),
            MatchRule::Centered => centered_on(tile_rect, slot_rect),
        };

        Ok(self
            .slots
            .iter()
            .filter(|slot| !slot.filled && slot.character == character)
            .find(|slot| {
                geometry
                    .element_rect(ElementId::Slot(slot.id))
                    .is_ok_and(reaches)
            })
            .map(|slot| slot.id))
    }

    fn snap(
        &mut self,
        tile: TileId,
        slot: SlotId,
        geometry: &impl GeometryProvider,
    ) -> Vec<RoundEvent> {
        let board_size = geometry
            .board_rect()
            .map_or(self.board_size, |board| board.size());

        let Some(slot_position) = self
            .slots
            .iter_mut()
            .find(|candidate| candidate.id == slot)
            .map(|slot| {
                slot.filled = true;
                slot.position
            })
        else {
            return Vec::new();
        };

        if let Some(tile) = self.tile_mut(tile) {
            tile.position = pixels_to_percent(slot_position, board_size);
            tile.fading = true;
        }
        self.deferred
            .schedule(self.config.fade_delay, DeferredTask::RemoveTile(tile));

        debug!("Snapped {tile:?} into {slot:?}");
        vec![RoundEvent::TileSnapped { tile, slot }]
    }

    fn solve(&mut self) -> Vec<RoundEvent> {
        if self.solved {
            return Vec::new();
        }
        info!("Solved {:?}", self.word);

        self.solved = true;
        for slot in &mut self.slots {
            slot.win_highlight = true;
        }
        self.deferred
            .schedule(self.config.celebration_delay, DeferredTask::Celebrate);
        vec![RoundEvent::Solved]
    }

    /// Advances deferred work by `delta` and retries a layout that was waiting for the board.
    pub fn tick(
        &mut self,
        delta: Duration,
        geometry: &impl GeometryProvider,
        rng: &mut Rng,
    ) -> Vec<RoundEvent> {
        let mut events = Vec::new();

        if let Ok(board) = geometry.board_rect() {
            if let Some(word) = self.pending_word.take() {
                events.extend(self.lay_out(word, board.size(), rng));
            }
            self.board_size = board.size();
        }

        for task in self.deferred.advance(delta) {
            match task {
                DeferredTask::RemoveTile(id) => {
                    self.tiles.retain(|tile| tile.id != id);
                    events.push(RoundEvent::TileRemoved(id));
                }
                DeferredTask::Celebrate => {
                    self.celebration
                        .launch(&self.slots, self.board_size, &self.config, rng);
                    self.deferred
                        .schedule(self.config.firework_duration, DeferredTask::ClearFireworks);
                    events.push(RoundEvent::CelebrationStarted);
                }
                DeferredTask::ClearFireworks => {
                    self.celebration.fireworks.clear();
                    events.push(RoundEvent::FireworksCleared);
                }
            }
        }

        events
    }

    /// Back to an empty board. Pending deferred work from the old round is dropped.
    pub fn reset(&mut self) -> Vec<RoundEvent> {
        info!("Resetting round");

        self.deferred.invalidate();
        self.word.clear();
        self.pending_word = None;
        self.slots.clear();
        self.tiles.clear();
        self.drag = None;
        self.celebration.clear();
        self.solved = false;

        vec![RoundEvent::Reset]
    }
}
