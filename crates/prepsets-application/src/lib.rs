//! Application layer of prepsets: catalog discovery, topic loading,
//! persistence reconciliation and the session controller that sequences them.

pub mod catalog;
pub mod content;
pub mod controller;
pub mod reconciler;
pub mod request;
pub mod view;

pub use catalog::CatalogLoader;
pub use content::ContentLoader;
pub use controller::SessionController;
pub use reconciler::{HydrationReport, PersistenceReconciler};
pub use request::{RequestTicket, RequestTracker};
pub use view::{EmptyState, SessionView, ViewRow};
