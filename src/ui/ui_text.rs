//! User-facing strings.

pub struct UiText {
    pub window_title: &'static str,
    pub loading: &'static str,
    pub error_heading: &'static str,
    pub reload_button: &'static str,
    pub commission_heading: &'static str,
    pub enable_system: &'static str,
    pub commission_rate_label: &'static str,
    pub min_withdrawal_label: &'static str,
    pub currency_label: &'static str,
    pub levels_heading: &'static str,
    pub add_level_button: &'static str,
    pub remove_button: &'static str,
    pub description_label: &'static str,
    pub level_rate_label: &'static str,
    pub save_commission_button: &'static str,
    pub preview_heading: &'static str,
    pub preview_default_rate: &'static str,
    pub preview_min_withdrawal: &'static str,
    pub preview_level_count: &'static str,
    pub preview_status: &'static str,
    pub preview_levels_heading: &'static str,
    pub status_active: &'static str,
    pub status_inactive: &'static str,
    pub display_heading: &'static str,
    pub app_name_label: &'static str,
    pub logo_url_label: &'static str,
    pub support_url_label: &'static str,
    pub tutorial_video_label: &'static str,
    pub slider_heading: &'static str,
    pub slider_url_hint: &'static str,
    pub slider_alt_hint: &'static str,
    pub slider_add_button: &'static str,
    pub slider_empty: &'static str,
    pub save_display_button: &'static str,
    pub saving: &'static str,
    pub store_label: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Referral Admin",
    loading: "Loading Admin Panel...",
    error_heading: "Error Loading Admin Panel",
    reload_button: "Reload Page",
    commission_heading: "Referral Commission System",
    enable_system: "Enable System:",
    commission_rate_label: "Default Commission Rate (%)",
    min_withdrawal_label: "Minimum Withdrawal",
    currency_label: "Currency",
    levels_heading: "Multi-Level Commission",
    add_level_button: "Add Level",
    remove_button: "Remove",
    description_label: "Description",
    level_rate_label: "Commission Rate (%)",
    save_commission_button: "Update Commission Settings",
    preview_heading: "Commission Preview",
    preview_default_rate: "Default Rate",
    preview_min_withdrawal: "Min Withdrawal",
    preview_level_count: "Commission Levels",
    preview_status: "System Status",
    preview_levels_heading: "Commission Levels:",
    status_active: "Active",
    status_inactive: "Inactive",
    display_heading: "App Display Settings",
    app_name_label: "App Name",
    logo_url_label: "Logo URL",
    support_url_label: "Support URL",
    tutorial_video_label: "Tutorial Video ID",
    slider_heading: "Slider Images",
    slider_url_hint: "https://… image url",
    slider_alt_hint: "alt text",
    slider_add_button: "Add Image",
    slider_empty: "No slider images yet",
    save_display_button: "Save App Settings",
    saving: "Saving…",
    store_label: "Store",
};
