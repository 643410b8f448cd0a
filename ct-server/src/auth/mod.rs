pub mod middleware;
pub mod reconciler;
