pub mod search_input_top_bar;
pub mod search_results_panel;
pub mod switch_controls;
