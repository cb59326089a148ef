pub mod events;
pub mod explorer;
pub mod form;
