mod traits;

pub use traits::{HoverPhysicsBackend, WorldRaycaster};
