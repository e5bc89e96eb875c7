use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;

    // Condition colors
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;
    pub const WET: Color = Color::LightBlue;
    pub const DRY: Color = Color::Yellow;
    pub const ACIDIC: Color = Color::LightRed;
    pub const NEUTRAL: Color = Color::Green;
    pub const ALKALINE: Color = Color::LightMagenta;

    /// Shades of green for per-crop chart series.
    pub const CROP_PALETTE: [Color; 8] = [
        Color::Rgb(0x1b, 0x43, 0x32),
        Color::Rgb(0x2d, 0x6a, 0x4f),
        Color::Rgb(0x40, 0x91, 0x6c),
        Color::Rgb(0x52, 0xb7, 0x88),
        Color::Rgb(0x74, 0xc6, 0x9d),
        Color::Rgb(0x95, 0xd5, 0xb2),
        Color::Rgb(0xb7, 0xe4, 0xc7),
        Color::Rgb(0xd8, 0xf3, 0xdc),
    ];

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 20.0 {
            Self::TEMP_COOL
        } else if temp_c < 32.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn moisture_color(percent_or_mm: f64, wet_above: f64, dry_below: f64) -> Color {
        if percent_or_mm >= wet_above {
            Self::WET
        } else if percent_or_mm < dry_below {
            Self::DRY
        } else {
            Self::SUCCESS
        }
    }

    pub fn ph_color(ph: f64) -> Color {
        if ph < 6.0 {
            Self::ACIDIC
        } else if ph <= 7.0 {
            Self::NEUTRAL
        } else {
            Self::ALKALINE
        }
    }

    /// Stable color for the nth crop in sorted label order.
    pub fn crop_color(index: usize) -> Color {
        // Skip the darkest shades on dark terminals
        let usable = &Self::CROP_PALETTE[2..];
        usable[index % usable.len()]
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
