//! Panel configuration types and builder

/// Error-tolerance policy for the `enable()` transition
///
/// Observed panel revisions disagree on whether a failed init script
/// should stop the bring-up or whether the backlight should be lit anyway.
/// Rather than hard-coding either, the policy is an explicit choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// A failed init script fails `enable()`; the backlight stays off and
    /// the panel state is unchanged. The safe default.
    #[default]
    Strict,
    /// A failed init script is logged, the backlight is enabled anyway and
    /// the transition completes. Matches panel revisions that tolerate a
    /// partially applied script.
    BestEffort,
}

/// Video timing descriptor handed to the video output pipeline
///
/// Pure configuration: the driver never acts on these values, it only
/// exposes them so the host can program its timing generator. All
/// horizontal values are in pixels, vertical values in lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub pixel_clock_khz: u32,
    /// Active width
    pub hactive: u16,
    /// Horizontal front porch
    pub hfront_porch: u16,
    /// Horizontal sync width
    pub hsync_len: u16,
    /// Horizontal back porch
    pub hback_porch: u16,
    /// Active height
    pub vactive: u16,
    /// Vertical front porch
    pub vfront_porch: u16,
    /// Vertical sync width
    pub vsync_len: u16,
    /// Vertical back porch
    pub vback_porch: u16,
    /// Data-enable signal is active low
    pub de_active_low: bool,
    /// Pixel data is latched on the falling clock edge
    pub pixdata_falling_edge: bool,
    /// Physical active-area width in millimeters
    pub width_mm: u16,
    /// Physical active-area height in millimeters
    pub height_mm: u16,
}

impl DisplayMode {
    /// Total line length including blanking
    pub fn htotal(&self) -> u16 {
        self.hactive + self.hfront_porch + self.hsync_len + self.hback_porch
    }

    /// Total frame height including blanking
    pub fn vtotal(&self) -> u16 {
        self.vactive + self.vfront_porch + self.vsync_len + self.vback_porch
    }
}

impl Default for DisplayMode {
    /// The panel's datasheet mode: 480x800 RGB888 at a 35.714 MHz pixel
    /// clock (28 ns, ILI9806E datasheet p.318)
    fn default() -> Self {
        Self {
            pixel_clock_khz: 35_714,
            hactive: 480,
            hfront_porch: 10,
            hsync_len: 20,
            hback_porch: 30,
            vactive: 800,
            vfront_porch: 10,
            vsync_len: 10,
            vback_porch: 20,
            de_active_low: true,
            pixdata_falling_edge: true,
            width_mm: 52,
            height_mm: 86,
        }
    }
}

/// Panel configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Video timing descriptor
    pub mode: DisplayMode,
    /// Error tolerance for `enable()`
    pub policy: ErrorPolicy,
    /// Number of DSI data lanes the panel is wired for
    pub lanes: u8,
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```
/// use ili9806e::{Builder, ErrorPolicy};
///
/// let config = Builder::new().policy(ErrorPolicy::BestEffort).build();
/// assert_eq!(config.lanes, 2);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    mode: Option<DisplayMode>,
    policy: ErrorPolicy,
    lanes: Option<u8>,
}

impl Builder {
    /// Create a new Builder with the panel's datasheet defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the video timing descriptor
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the `enable()` error-tolerance policy
    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the DSI lane count
    pub fn lanes(mut self, lanes: u8) -> Self {
        self.lanes = Some(lanes);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            mode: self.mode.unwrap_or_default(),
            policy: self.policy,
            lanes: self.lanes.unwrap_or(2),
        }
    }
}
