pub mod docker;
pub mod event;
pub mod notifier;
pub mod runtime;
pub mod webhook;
