pub const CONTAINER: &str = "bg-gray-900 container mx-auto px-6 py-10 max-w-4xl rounded-xl shadow-lg mt-16";

pub const CARD: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6";
pub const CARD_HOVER_SCALE: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6 transform transition-transform duration-200 hover:scale-105";
pub const CARD_SECTION: &str = "bg-gray-800 border border-gray-700 p-3 rounded-lg shadow-sm";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";

pub const INPUT_BASE: &str = "appearance-none border border-gray-600 bg-gray-800 text-white text-lg rounded-md w-full py-2 px-4 focus:outline-none focus:border-blue-500";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-blue-600 hover:bg-blue-700 focus:ring-2 focus:ring-blue-400 focus:outline-none";
pub const BUTTON_DANGER: &str = "bg-red-600 hover:bg-red-700 focus:ring-2 focus:ring-red-400 focus:outline-none";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-gray-200";
pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-4 text-center text-gray-100";
pub const HEADING_MD: &str = "text-2xl font-bold mb-5 text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-gray-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const GRID_COLS_3: &str = "grid grid-cols-3 gap-4";
pub const SPACE_Y_BASE: &str = "space-y-3";
pub const SPACE_Y_LG: &str = "space-y-6";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary() -> String {
    combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
}

pub fn button_danger() -> String {
    combine_classes(BUTTON_BASE, BUTTON_DANGER)
}

pub fn alert_style(style: &str) -> String {
    match style {
        "error" => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        "success" => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        _ => combine_classes(ALERT_CARD, "bg-blue-500 text-white shadow-lg"),
    }
}

pub fn status_badge(status: &str) -> String {
    let colour = match status {
        "pending" => "bg-gray-600 text-gray-100",
        "doing" => "bg-blue-700 text-blue-100",
        "completed" => "bg-green-700 text-green-100",
        "paused" => "bg-yellow-700 text-yellow-100",
        _ => "bg-red-800 text-red-100",
    };
    combine_classes("px-2 py-1 rounded text-xs font-semibold uppercase", colour)
}
