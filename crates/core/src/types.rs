use serde::{Deserialize, Serialize};

/// Grid cell as (row, column). Valid cells have both coordinates in `[0, size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Empty,
    Wall,
}

/// The four movement directions, in the order used for every deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::West, Direction::East];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::West => (0, -1),
            Self::East => (0, 1),
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::West => 2,
            Self::East => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

/// A resolved player input. Raw keys are normalized by the input layer before reaching here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Move(Direction),
    PlaceTrap,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionResult {
    Win,
    Loss,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
    Quit,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Playing
    }

    pub fn result(self) -> Option<SessionResult> {
        match self {
            Self::Playing => None,
            Self::Won => Some(SessionResult::Win),
            Self::Lost => Some(SessionResult::Loss),
            Self::Quit => Some(SessionResult::Quit),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentId {
    /// Model-aware interceptor, always present.
    Primary,
    /// Greedy chaser, only in dual-agent sessions.
    Secondary,
}

impl AgentId {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "A",
            Self::Secondary => "B",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    SessionStarted { seed: u64, dual_agents: bool },
    PlayerMoved { direction: Direction, to: Pos },
    MoveBlocked { direction: Direction },
    TrapPlaced { pos: Pos, remaining: u32 },
    TrapUnavailable,
    MovePredicted { direction: Direction },
    AgentMoved { agent: AgentId, from: Pos, to: Pos },
    AgentHeld { agent: AgentId },
    AgentTrapped { agent: AgentId, pos: Pos },
    AgentStunned { agent: AgentId, turns_left: u32 },
    SessionEnded { result: SessionResult, turn: u32 },
}

impl LogEvent {
    /// Advisory line shown to the player, if the event warrants one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::MoveBlocked { .. } => Some("Blocked.".to_string()),
            Self::TrapPlaced { .. } => Some("Trap placed.".to_string()),
            Self::TrapUnavailable => Some("No traps left or trap already here.".to_string()),
            Self::AgentTrapped { agent, .. } => Some(format!("AI {} stunned!", agent.label())),
            Self::SessionEnded { result: SessionResult::Win, .. } => {
                Some("You reached the goal! You win.".to_string())
            }
            Self::SessionEnded { result: SessionResult::Loss, .. } => {
                Some("Caught by AI. Game over.".to_string())
            }
            Self::SessionEnded { result: SessionResult::Quit, .. } => {
                Some("Session abandoned.".to_string())
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Turn number the action was resolved in.
    pub turn: u32,
    pub status: SessionStatus,
    pub events: Vec<LogEvent>,
}
