//! Game state: the single root value threaded through `dispatch`.
//!
//! ## GameState
//!
//! Everything the game is at one instant:
//! - Lifecycle status, phase, turn counter and acting player
//! - Seated players with their hands
//! - Potatoes in hands, the deck and the discard pile
//! - Transient play context (pending card, reaction window, food fight
//!   picks, the rewind slot)
//! - Action history, house rules and the RNG
//!
//! Uses `im` persistent data structures, so the working copy each dispatch
//! makes is O(1) and the caller's value is never touched.
//!
//! ## Potato bookkeeping
//!
//! A potato exists twice: as a card in some hand and as a `PotatoState`
//! holding its heat. The card's location is authoritative; `holder_id` is
//! kept in step with it by every move (see `rules::resolution`).

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::HouseRules;
use super::player::{PlayerId, PlayerState};
use super::rng::GameRng;
use crate::cards::{CardId, CardIdGen, CardName};
use crate::rules::GameResult;
use crate::zones::Pile;

/// Lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Lobby,
    Playing,
    GameOver,
}

/// Turn state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    /// Current player may play, draw or end the turn.
    #[default]
    AwaitingAction,
    /// A Pass or Quick Pass waits for its target.
    SelectTarget,
    /// A pass is being carried out (transient).
    ResolvingCard,
    /// Current player must discard down to the hand limit.
    Discarding,
    /// The pass target may answer with Quick Pass or Oven Mitt.
    AwaitingReaction,
    /// The Oven Mitt holder picks a neighbour.
    SelectingReactionTarget,
    /// Every living player picks a card to pass along.
    FoodFightSelect,
    /// Current player may chain a Quick Pass before the turn ends.
    PostAction,
    /// About to run end-of-turn processing (transient).
    EndTurn,
}

/// Turn order direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Seat index increases.
    #[default]
    Clockwise,
    /// Seat index decreases.
    Counterclockwise,
}

impl Direction {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }

    /// Seat `steps` away from `seat` in this direction, over `n` seats.
    #[must_use]
    pub fn step(self, seat: usize, steps: usize, n: usize) -> usize {
        let steps = steps % n;
        match self {
            Direction::Clockwise => (seat + steps) % n,
            Direction::Counterclockwise => (seat + n - steps) % n,
        }
    }
}

/// Heat and ownership of one potato card in a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotatoState {
    /// Same as the potato card's id.
    pub id: CardId,
    pub topping_count: u32,
    pub holder_id: PlayerId,
    /// Immune to toppings until the holder's next turn starts.
    pub is_frozen: bool,
}

impl PotatoState {
    #[must_use]
    pub fn new(id: CardId, holder_id: PlayerId, topping_count: u32) -> Self {
        Self {
            id,
            topping_count,
            holder_id,
            is_frozen: false,
        }
    }
}

/// An open reaction window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionContext {
    pub initiator_id: PlayerId,
    pub defender_id: PlayerId,
    pub potato_id: CardId,
    /// The movement card that started the pass.
    pub original_card_id: CardId,
    /// Quick Pass or Oven Mitt.
    pub reaction_card: CardName,
}

/// The single rewind slot: potatoes and direction before the last play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaySnapshot {
    pub potatoes: Vector<PotatoState>,
    pub direction: Direction,
}

/// A committed card waiting for its target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPlay {
    pub card_id: CardId,
    /// Rewind slot as it was before this card overwrote it.
    pub prior_snapshot: Option<PlaySnapshot>,
    /// Phase the card was played from; CANCEL_PLAY returns there.
    pub return_phase: TurnPhase,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    // === Progression ===
    pub status: GameStatus,
    pub turn_phase: TurnPhase,
    pub current_player_id: Option<PlayerId>,
    pub direction: Direction,
    /// Starts at 1 on deal.
    pub turn_number: u32,
    /// Bumped once per accepted dispatch.
    pub revision: u64,

    // === Table ===
    /// Seating order.
    pub players: Vector<PlayerState>,
    pub potatoes: Vector<PotatoState>,
    pub deck: Pile,
    pub discard: Pile,

    // === Play context ===
    pub pending_play: Option<PendingPlay>,
    pub double_dip_active: bool,
    pub reaction_context: Option<ReactionContext>,
    pub food_fight_selections: OrdMap<PlayerId, CardId>,
    pub last_play_snapshot: Option<PlaySnapshot>,
    pub cards_drawn_this_turn: u32,
    /// This turn's Quick Pass chain window has been offered.
    pub post_action_offered: bool,

    // === Reporting ===
    /// Last human-readable event. Never read by the rules.
    pub notification: Option<String>,
    /// Bumped when a rejected action sets `notification`. Rejections leave
    /// `revision` alone, so change detection watches both counters.
    pub notice_count: u64,
    pub result: Option<GameResult>,
    pub history: Vector<ActionRecord>,

    // === Engine ===
    pub rules: HouseRules,
    pub rng: GameRng,
    card_ids: CardIdGen,
    next_player_id: u16,
}

impl GameState {
    /// An empty lobby with default rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, HouseRules::default())
    }

    #[must_use]
    pub fn with_rules(seed: u64, rules: HouseRules) -> Self {
        Self::lobby(GameRng::new(seed), rules)
    }

    pub(crate) fn lobby(rng: GameRng, rules: HouseRules) -> Self {
        Self {
            status: GameStatus::Lobby,
            turn_phase: TurnPhase::AwaitingAction,
            current_player_id: None,
            direction: Direction::Clockwise,
            turn_number: 0,
            revision: 0,
            players: Vector::new(),
            potatoes: Vector::new(),
            deck: Pile::new(),
            discard: Pile::new(),
            pending_play: None,
            double_dip_active: false,
            reaction_context: None,
            food_fight_selections: OrdMap::new(),
            last_play_snapshot: None,
            cards_drawn_this_turn: 0,
            post_action_offered: false,
            notification: None,
            notice_count: 0,
            result: None,
            history: Vector::new(),
            rules,
            rng,
            card_ids: CardIdGen::new(),
            next_player_id: 0,
        }
    }

    // === Players ===

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        let seat = self.seat_of(id)?;
        self.players.get_mut(seat)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerState> {
        self.current_player_id.and_then(|id| self.player(id))
    }

    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_alive)
    }

    pub fn living_players(&self) -> impl Iterator<Item = &PlayerState> + '_ {
        self.players.iter().filter(|p| p.is_alive)
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.living_players().count()
    }

    /// Allocate the next player ID, or `None` once IDs run out.
    pub(crate) fn alloc_player_id(&mut self) -> Option<PlayerId> {
        let raw = u8::try_from(self.next_player_id).ok()?;
        self.next_player_id += 1;
        Some(PlayerId::new(raw))
    }

    // === Cards ===

    /// Allocate an ID for a new card.
    pub fn alloc_card_id(&mut self) -> CardId {
        self.card_ids.alloc()
    }

    /// Card allocator and RNG together, for dealing.
    pub(crate) fn dealer_parts(&mut self) -> (&mut CardIdGen, &mut GameRng) {
        (&mut self.card_ids, &mut self.rng)
    }

    /// ID of the card waiting for a target.
    #[must_use]
    pub fn pending_card_id(&self) -> Option<CardId> {
        self.pending_play.as_ref().map(|p| p.card_id)
    }

    /// Cards in the deck, the discard pile and every hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    // === Potatoes ===

    #[must_use]
    pub fn potato(&self, id: CardId) -> Option<&PotatoState> {
        self.potatoes.iter().find(|p| p.id == id)
    }

    /// Highest topping count in play (0 with no potatoes).
    #[must_use]
    pub fn max_heat(&self) -> u32 {
        self.potatoes.iter().map(|p| p.topping_count).max().unwrap_or(0)
    }

    // === Results ===

    /// Winner names joined with ", ", or "Nobody".
    #[must_use]
    pub fn winner_label(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let names: Vec<&str> = self
            .players
            .iter()
            .filter(|p| result.is_winner(p.id))
            .map(|p| p.name.as_str())
            .collect();
        if names.is_empty() {
            Some("Nobody".to_string())
        } else {
            Some(names.join(", "))
        }
    }
}
