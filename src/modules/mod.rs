// Module exports
pub mod navigation; // Pure navigation state + session history
pub mod bridge;     // Publishes navigation snapshots to the toolbar
pub mod favorites;  // Favorites commands + change events
