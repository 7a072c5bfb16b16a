pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{
    ClickEvent, EventHandled, InputEvent, MapEvent, MapEventKind, MouseButton,
};
pub use handler::{EventCallback, EventManager};
