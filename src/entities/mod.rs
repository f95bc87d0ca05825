//! Everything that lives on the runner canvas.

pub mod cloud;
pub mod collision;
pub mod distance_meter;
pub mod game_over_panel;
pub mod horizon;
pub mod horizon_line;
pub mod obstacle;
pub mod trex;

pub use collision::{box_compare, check_for_collision, CollisionBox};
pub use distance_meter::DistanceMeter;
pub use game_over_panel::GameOverPanel;
pub use horizon::Horizon;
pub use obstacle::{Obstacle, ObstacleKind};
pub use trex::{Trex, TrexStatus};
