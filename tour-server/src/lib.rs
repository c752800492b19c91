//! Day-tour planner server.
//!
//! A web application that answers: "given these activities, this budget and
//! this much time, which day tours can we do?"

pub mod catalog;
pub mod domain;
pub mod planner;
pub mod transit;
pub mod web;
