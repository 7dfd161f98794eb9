//! Application context: the catalog, the selection cursor and the derived
//! display state.
//!
//! `App` is built once by the runtime and passed by reference; it is only
//! ever touched from the consumer loop's thread.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};

use crate::audio::PlaybackInfo;
use crate::bus::SelectionHandle;
use crate::catalog::{Catalog, Track};
use crate::config::LibrarySettings;
use crate::cursor::SelectionCursor;
use crate::display::DisplayState;
use crate::metadata::TrackInfo;

pub struct App {
    pub catalog: Catalog,
    pub cursor: SelectionCursor,
    selection: SelectionHandle,

    /// Tags of the track last handed to the engine.
    pub track_info: Option<TrackInfo>,
    /// Last snapshot received from the engine.
    pub playback: PlaybackInfo,
    pub display: DisplayState,

    /// Engine generation whose natural end has already been acted on.
    pub advanced_generation: Option<u64>,
}

impl App {
    /// Create an empty `App` that publishes its selection through `selection`.
    pub fn new(selection: SelectionHandle) -> Self {
        let app = Self {
            catalog: Catalog::default(),
            cursor: SelectionCursor::default(),
            selection,
            track_info: None,
            playback: PlaybackInfo::default(),
            display: DisplayState::idle(),
            advanced_generation: None,
        };
        app.publish_selection();
        app
    }

    /// Scan `root` and replace the catalog wholesale; the cursor goes back
    /// to the first track.
    pub fn populate(&mut self, root: &Path, settings: &LibrarySettings) {
        self.catalog = Catalog::build(root, settings);
        self.cursor.reset(self.catalog.len());
        self.publish_selection();
    }

    fn publish_selection(&self) {
        let path = self.selected_path();
        if let Ok(mut slot) = self.selection.lock() {
            *slot = path;
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.current(&self.catalog)
    }

    pub fn selected_path(&self) -> Option<PathBuf> {
        self.current_track().map(|t| t.path.clone())
    }

    /// Display name of the selected track, `""` when there is none.
    pub fn current_track_name(&self) -> &str {
        self.cursor
            .position()
            .map(|p| self.catalog.track_display_name_at(p))
            .unwrap_or("")
    }

    /// Move to the next track and return its display name.
    pub fn next_track(&mut self) -> &str {
        self.cursor.move_next();
        self.publish_selection();
        self.current_track_name()
    }

    /// Move to the previous track and return its display name.
    pub fn previous_track(&mut self) -> &str {
        self.cursor.move_previous();
        self.publish_selection();
        self.current_track_name()
    }

    #[cfg(test)]
    pub fn track_list(&self) -> Vec<&str> {
        self.catalog.track_names()
    }

    #[cfg(test)]
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let found = self.cursor.select_by_name(&self.catalog, name);
        if found {
            self.publish_selection();
        }
        found
    }

    /// Move the cursor onto the track at `path`, if the catalog has it.
    pub fn select_path(&mut self, path: &Path) -> bool {
        let found = self
            .catalog
            .position_of_path(path)
            .is_some_and(|i| self.cursor.select(i));
        if found {
            self.publish_selection();
        }
        found
    }

    /// Handle a key the control bus did not consume. Returns whether the
    /// tree navigation used it.
    pub fn handle_navigation(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Down => {
                self.next_track();
            }
            KeyCode::Up => {
                self.previous_track();
            }
            KeyCode::Home => {
                self.cursor.first();
                self.publish_selection();
            }
            KeyCode::End => {
                self.cursor.last();
                self.publish_selection();
            }
            _ => return false,
        }
        true
    }

    pub fn set_track_info(&mut self, info: Option<TrackInfo>) {
        self.track_info = info;
        self.refresh_display();
    }

    /// Take a new engine snapshot and recompute the display state.
    pub fn refresh_playback(&mut self, info: PlaybackInfo) {
        self.playback = info;
        self.refresh_display();
    }

    fn refresh_display(&mut self) {
        self.display = DisplayState::from_playback(&self.playback, self.track_info.as_ref());
    }

    /// Whether the engine reports a natural end that has not been handled yet.
    pub fn needs_advance(&self) -> bool {
        self.playback.finished && self.advanced_generation != Some(self.playback.generation)
    }

    pub fn mark_advanced(&mut self) {
        self.advanced_generation = Some(self.playback.generation);
    }
}
