pub mod poll_controllers;
pub mod root_controller;
