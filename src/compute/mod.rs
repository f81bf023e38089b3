//! Simulation core.
//!
//! Every function that needs randomness takes the generator as a parameter, so
//! a seeded RNG makes a whole session reproducible. Nothing in here performs
//! I/O or talks to the renderer.

pub mod collision;
pub mod effects;
pub mod kinematics;
pub mod player;
pub mod session;
pub mod spawn;
pub mod state_machine;
pub mod store;
pub mod weapon;

pub use collision::{Burst, CollisionOutcome, CollisionSystem, DamageEvent, DamageTarget, PowerUpDrop};
pub use effects::EffectsSystem;
pub use kinematics::MoveIntent;
pub use session::{FrameReport, Session, Snapshot, TickInput};
pub use spawn::{SpawnDirector, SpawnRequest};
pub use state_machine::{GameStateMachine, Verdict};
pub use store::{EntityStore, IdAllocator};
pub use weapon::WeaponSystem;
