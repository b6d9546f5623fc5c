// TUI tests - exercising the App view-model against mock backends
// - app_tests: send/poll cycle, rejection rules, connectivity flow
// - ui_tests: pure rendering helpers

mod app_tests;
