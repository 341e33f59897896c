//! Default config file with inline documentation.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# webshim configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Application"
# width = 800             # 100-16384
# height = 600            # 100-16384
# min_width = 300
# min_height = 300
# resizable = true
# decorations = "full"    # full, none
# startup_mode = "windowed"  # windowed, maximized, fullscreen
# visible = true
# hide_on_close = false

[content]
# url = "https://example.com"
# html_file = "/path/to/page.html"   # exclusive with url
# debug = false

[appearance]
# background = "#1e1e2e"  # #rrggbb or #rrggbbaa
# zoom = 1.0              # 0.25-5.0
# css_file = "/path/to/style.css"

[logging]
# level = "INFO"          # TRACE, DEBUG, INFO, WARNING, ERROR
# filter = "wry=warn"
"##
}
