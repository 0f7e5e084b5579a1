// Helper functions that do not belong to any single installer.

pub mod misc_utils;
