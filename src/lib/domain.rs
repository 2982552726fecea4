//! Domain types: the message, its credentials, the mailer seam and the dispatch flow

pub mod communication;
pub mod dispatch;
