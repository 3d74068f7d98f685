//! Navigable, selectable list of labelled rectangles.
//!
//! A [`MenuList`] is built once from a [`MenuListInput`]: mandatory fields are
//! validated, layout and colors are defaulted, every item's colors are
//! resolved against the list defaults, and one off-screen surface is allocated
//! per item. Rendering afterwards only fills, draws and composites.

use std::fmt;

use image::Rgba;
use log::{debug, error};
use thiserror::Error;

use crate::core::gfx::{Surface, SurfaceError};
use crate::ui::color;
use crate::ui::font::Font;

/// Default text baseline sits this many pixels above an item's bottom edge.
const TEXT_BASELINE_INSET: i32 = 5;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("mandatory input field {field} is missing")]
    Validation { field: &'static str },
    #[error("failed to allocate surface for menu item '{name}'")]
    ResourceAllocation {
        name: String,
        #[source]
        source: SurfaceError,
    },
}

/// The four colors an item is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemColors {
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    pub selected_background: Rgba<u8>,
    pub selected_text: Rgba<u8>,
}

impl ItemColors {
    pub const DEFAULT: Self = Self {
        background: color::MENU_BACKGROUND,
        text: color::MENU_TEXT,
        selected_background: color::MENU_SELECTED_BACKGROUND,
        selected_text: color::MENU_SELECTED_TEXT,
    };

    #[inline(always)]
    pub const fn background_for(&self, selected: bool) -> Rgba<u8> {
        if selected {
            self.selected_background
        } else {
            self.background
        }
    }

    #[inline(always)]
    pub const fn text_for(&self, selected: bool) -> Rgba<u8> {
        if selected {
            self.selected_text
        } else {
            self.text
        }
    }
}

impl Default for ItemColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One entry of a [`MenuListInput`]. Unset colors fall back to the list
/// defaults; a zero `text_y` places the baseline 5px above the item bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuItemInput {
    pub name: String,
    pub text: String,
    pub text_x: i32,
    pub text_y: i32,
    pub background: Option<Rgba<u8>>,
    pub text_color: Option<Rgba<u8>>,
    pub selected_background: Option<Rgba<u8>>,
    pub selected_text: Option<Rgba<u8>>,
}

impl MenuItemInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub const fn with_text_offset(mut self, x: i32, y: i32) -> Self {
        self.text_x = x;
        self.text_y = y;
        self
    }

    pub const fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = Some(color);
        self
    }

    #[cfg(test)]
    pub const fn with_text_color(mut self, color: Rgba<u8>) -> Self {
        self.text_color = Some(color);
        self
    }

    #[cfg(test)]
    pub const fn with_selected_background(mut self, color: Rgba<u8>) -> Self {
        self.selected_background = Some(color);
        self
    }

    #[cfg(test)]
    pub const fn with_selected_text(mut self, color: Rgba<u8>) -> Self {
        self.selected_text = Some(color);
        self
    }
}

/// Construction parameters for a [`MenuList`].
///
/// `width`, `height` and `items` are mandatory. `offy` of zero means "one
/// item height"; `offx` has no default beyond zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuListInput {
    pub tx: f32,
    pub ty: f32,
    pub width: u32,
    pub height: u32,
    pub offx: f32,
    pub offy: f32,
    pub default_background: Option<Rgba<u8>>,
    pub default_text: Option<Rgba<u8>>,
    pub default_selected_background: Option<Rgba<u8>>,
    pub default_selected_text: Option<Rgba<u8>>,
    pub items: Vec<MenuItemInput>,
}

pub struct MenuItem<S> {
    name: String,
    text: String,
    text_offset: (i32, i32),
    colors: ItemColors,
    surface: S,
}

impl<S> MenuItem<S> {
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline(always)]
    pub const fn text_offset(&self) -> (i32, i32) {
        self.text_offset
    }

    #[inline(always)]
    pub const fn colors(&self) -> &ItemColors {
        &self.colors
    }

    #[cfg(test)]
    pub const fn surface(&self) -> &S {
        &self.surface
    }
}

pub struct MenuList<S> {
    tx: f32,
    ty: f32,
    width: u32,
    height: u32,
    offx: f32,
    offy: f32,
    defaults: ItemColors,
    selected_index: usize,
    items: Vec<MenuItem<S>>,
}

impl<S: Surface> MenuList<S> {
    pub fn new(input: MenuListInput) -> Result<Self, MenuError> {
        if input.width == 0 {
            return Err(MenuError::Validation { field: "width" });
        }
        if input.height == 0 {
            return Err(MenuError::Validation { field: "height" });
        }
        if input.items.is_empty() {
            return Err(MenuError::Validation { field: "items" });
        }

        let offy = if input.offy == 0.0 {
            input.height as f32
        } else {
            input.offy
        };

        let defaults = ItemColors {
            background: input.default_background.unwrap_or(color::MENU_BACKGROUND),
            text: input.default_text.unwrap_or(color::MENU_TEXT),
            selected_background: input
                .default_selected_background
                .unwrap_or(color::MENU_SELECTED_BACKGROUND),
            selected_text: input
                .default_selected_text
                .unwrap_or(color::MENU_SELECTED_TEXT),
        };

        // Each color resolves on its own: overriding one leaves the rest on
        // the list defaults.
        let default_text_y = input.height as i32 - TEXT_BASELINE_INSET;
        let mut items = Vec::with_capacity(input.items.len());
        for item in input.items {
            let colors = ItemColors {
                background: item.background.unwrap_or(defaults.background),
                text: item.text_color.unwrap_or(defaults.text),
                selected_background: item
                    .selected_background
                    .unwrap_or(defaults.selected_background),
                selected_text: item.selected_text.unwrap_or(defaults.selected_text),
            };
            let text_y = if item.text_y == 0 {
                default_text_y
            } else {
                item.text_y
            };

            let surface = match S::allocate(input.width, input.height) {
                Ok(surface) => surface,
                Err(source) => {
                    error!(
                        "Menu item '{}' could not get a {}x{} surface: {source}",
                        item.name, input.width, input.height
                    );
                    return Err(MenuError::ResourceAllocation {
                        name: item.name,
                        source,
                    });
                }
            };

            items.push(MenuItem {
                name: item.name,
                text: item.text,
                text_offset: (item.text_x, text_y),
                colors,
                surface,
            });
        }

        debug!(
            "Built menu: {} items of {}x{} at ({}, {}), step ({}, {}).",
            items.len(),
            input.width,
            input.height,
            input.tx,
            input.ty,
            input.offx,
            offy
        );

        Ok(Self {
            tx: input.tx,
            ty: input.ty,
            width: input.width,
            height: input.height,
            offx: input.offx,
            offy,
            defaults,
            selected_index: 0,
            items,
        })
    }

    /// Draws every item onto `target`, first item at the list translation and
    /// each following one stepped by the item offset.
    ///
    /// Item surfaces are reused: each call refills them in place.
    pub fn render(&mut self, target: &mut S, font: &dyn Font) {
        let (mut x, mut y) = (self.tx, self.ty);
        for (index, item) in self.items.iter_mut().enumerate() {
            let selected = index == self.selected_index;
            let colors = *item.colors();
            let (text_x, text_y) = item.text_offset();
            item.surface.fill(colors.background_for(selected));
            item.surface.draw_text(
                &item.text,
                font,
                text_x,
                text_y,
                colors.text_for(selected),
            );
            target.draw_surface(&item.surface, x, y);
            x += self.offx;
            y += self.offy;
        }
    }
}

impl<S> MenuList<S> {
    /// Name of the highlighted item.
    #[inline(always)]
    pub fn selected_item_name(&self) -> &str {
        self.items[self.selected_index].name()
    }

    /// Moves the cursor down one item, stopping at the last.
    pub fn increment_selection(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
    }

    /// Moves the cursor up one item, stopping at the first.
    pub fn decrement_selection(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    #[inline(always)]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[inline(always)]
    pub fn items(&self) -> &[MenuItem<S>] {
        &self.items
    }

    #[inline(always)]
    pub const fn defaults(&self) -> &ItemColors {
        &self.defaults
    }

    #[inline(always)]
    pub const fn translation(&self) -> (f32, f32) {
        (self.tx, self.ty)
    }

    #[inline(always)]
    pub const fn item_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline(always)]
    pub const fn item_offset(&self) -> (f32, f32) {
        (self.offx, self.offy)
    }
}

impl<S> fmt::Debug for MenuList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.items().iter().map(MenuItem::name).collect::<Vec<_>>();
        f.debug_struct("MenuList")
            .field("items", &names)
            .field("selected_index", &self.selected_index())
            .field("translation", &self.translation())
            .field("item_size", &self.item_size())
            .field("item_offset", &self.item_offset())
            .field("defaults", self.defaults())
            .finish()
    }
}
