pub mod application_controllers;
pub mod camera_controller;
pub mod ui_controller;
