pub mod command;
pub mod controller;
pub mod motor_link;
