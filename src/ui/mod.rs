pub mod app;
pub use app::App;

pub mod dispatcher;
pub use dispatcher::Dispatcher;

pub mod controller;
pub use controller::Spawner;

pub mod routing;
pub use routing::RoutingPanel;
