//! Colours, palettes, fonts and widget style/state words.
//!
//! Each widget variant has its own typed style set instead of one shared
//! untyped style word; the runtime state words (`ButtonState`,
//! `FormState`, ...) are separate from the styles because dispatch and
//! display read them every frame while styles are fixed at construction.

use bitflags::bitflags;

// =============================================================================
// Colours
// =============================================================================

/// An RGBA colour with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GREY: Self = Self::rgb(64, 64, 64);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque colour from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A colour from RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The slots of a form's colour table.
///
/// Widgets never hold colours of their own; they paint with the enclosing
/// form's palette, indexed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourRole {
    /// Form and button background fill.
    Background,
    /// Body text.
    Text,
    /// Light bevel edge (top/left of a raised box).
    Light,
    /// Dark bevel edge (bottom/right of a raised box).
    Dark,
    /// Hover highlight accents.
    Highlight,
    /// Edit box caret.
    Cursor,
}

impl ColourRole {
    const COUNT: usize = 6;
}

/// A fixed-slot colour table owned by every form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: [Colour; ColourRole::COUNT],
}

impl Palette {
    /// Look up a colour by role.
    #[inline]
    pub fn colour(&self, role: ColourRole) -> Colour {
        self.colours[role as usize]
    }

    /// Replace a colour by role.
    #[inline]
    pub fn set_colour(&mut self, role: ColourRole, colour: Colour) {
        self.colours[role as usize] = colour;
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut colours = [Colour::BLACK; ColourRole::COUNT];
        colours[ColourRole::Background as usize] = Colour::rgba(0, 0, 48, 200);
        colours[ColourRole::Text as usize] = Colour::WHITE;
        colours[ColourRole::Light as usize] = Colour::rgb(120, 120, 160);
        colours[ColourRole::Dark as usize] = Colour::rgb(32, 32, 64);
        colours[ColourRole::Highlight as usize] = Colour::rgb(255, 220, 80);
        colours[ColourRole::Cursor as usize] = Colour::WHITE;
        Self { colours }
    }
}

// =============================================================================
// Fonts
// =============================================================================

/// An opaque handle into the caller's text service.
///
/// The toolkit never interprets the value; it is passed back verbatim to
/// the [`Painter`](crate::paint::Painter) and tooltip handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

impl FontId {
    /// The default body font.
    pub const REGULAR: Self = Self(0);
}

impl Default for FontId {
    fn default() -> Self {
        Self::REGULAR
    }
}

// =============================================================================
// Styles (fixed at construction)
// =============================================================================

bitflags! {
    /// Form construction styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FormStyle: u32 {
        /// Do not paint the form background; children paint normally.
        const INVISIBLE = 0x01;
        /// The form behaves as a single large button and intercepts
        /// clicks before its children.
        const CLICKABLE = 0x02;
        /// Suppress the one-pixel child offset while a clickable form
        /// is held down.
        const NO_CLICK_MOVE = 0x04;
        /// A clickable form that ignores the primary click key.
        const NO_PRIMARY = 0x08;
        /// A clickable form that also accepts the secondary click key.
        const SECONDARY = 0x10;
    }
}

bitflags! {
    /// Button construction styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonStyle: u32 {
        /// Ignore the primary click key.
        const NO_PRIMARY = 0x01;
        /// Also accept the secondary click key.
        const SECONDARY = 0x02;
        /// Centre the label text horizontally.
        const TEXT_CENTRE = 0x04;
    }
}

bitflags! {
    /// Label text alignment.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LabelStyle: u32 {
        const ALIGN_LEFT = 0x01;
        const ALIGN_CENTRE = 0x02;
        const ALIGN_RIGHT = 0x04;
    }
}

/// Direction a slider's track runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Direction a bar graph fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrientation {
    /// Fill left to right.
    #[default]
    Left,
    /// Fill right to left.
    Right,
    /// Fill top to bottom.
    Top,
    /// Fill bottom to top.
    Bottom,
}

// =============================================================================
// Runtime state words
// =============================================================================

bitflags! {
    /// Runtime state of a button.
    ///
    /// `DOWN` and `HIGHLIGHT` are transient input states maintained by
    /// dispatch; the rest are caller-controlled via
    /// [`set_state`](crate::widget::Widget::set_state).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonState: u32 {
        /// The button ignores clicks and paints greyed out.
        const DISABLED = 0x01;
        /// Locked in the down position; still ignores clicks.
        const LOCKED = 0x02;
        /// Latches down when clicked (caller clears it).
        const CLICK_LOCK = 0x04;
        /// The button flashes until clicked.
        const FLASH = 0x08;
        /// Held down by the pointer right now.
        const DOWN = 0x10;
        /// The pointer is over the button.
        const HIGHLIGHT = 0x20;
    }
}

impl ButtonState {
    /// The caller-controlled bits accepted by `set_state`.
    pub const PERSISTENT: Self = Self::DISABLED
        .union(Self::LOCKED)
        .union(Self::CLICK_LOCK)
        .union(Self::FLASH);
}

bitflags! {
    /// Runtime state of a clickable form. Mirrors [`ButtonState`]; the
    /// depressed-children paint offset applies while any of
    /// `DOWN | LOCKED | CLICK_LOCK` is set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FormState: u32 {
        const DISABLED = 0x01;
        const LOCKED = 0x02;
        const CLICK_LOCK = 0x04;
        const FLASH = 0x08;
        const DOWN = 0x10;
        const HIGHLIGHT = 0x20;
    }
}

impl FormState {
    /// The caller-controlled bits accepted by `set_state`.
    pub const PERSISTENT: Self = Self::DISABLED
        .union(Self::LOCKED)
        .union(Self::CLICK_LOCK)
        .union(Self::FLASH);

    /// The states that depress a clickable form's children by one pixel.
    pub const DEPRESSED: Self = Self::DOWN.union(Self::LOCKED).union(Self::CLICK_LOCK);
}

bitflags! {
    /// Runtime state of a slider.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SliderState: u32 {
        /// The thumb is being dragged.
        const DRAG = 0x01;
        /// The pointer is over the slider.
        const HIGHLIGHT = 0x02;
        /// The slider ignores input.
        const DISABLED = 0x04;
    }
}
