//! Terminal rendering of the widget

use std::collections::HashSet;

use colored::*;
use parking_lot::Mutex;

use crate::application::ports::WidgetView;
use crate::domain::timer::PLACEHOLDER;
use crate::domain::widget::{Element, SessionSnapshot, TextOutput};

#[derive(Debug)]
struct Screen {
    visible: HashSet<Element>,
    elapsed: String,
    duration: String,
    slider_value: f64,
    slider_max: f64,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            visible: HashSet::new(),
            elapsed: PLACEHOLDER.to_string(),
            duration: PLACEHOLDER.to_string(),
            slider_value: 0.0,
            slider_max: 0.0,
        }
    }
}

impl Screen {
    /// One line: timers, slider and the currently visible controls
    fn render(&self) -> String {
        let controls: Vec<&str> = Element::ALL
            .iter()
            .filter(|e| !matches!(e, Element::VideoOverlay | Element::ImageContainer))
            .filter(|e| self.visible.contains(e))
            .map(|e| e.as_str())
            .collect();

        let recording = self.visible.contains(&Element::StopRecord);
        let marker = if recording { "●".red() } else { "■".dimmed() };

        format!(
            "{} {} / {} [{:.0}/{:.0}] {}",
            marker,
            self.elapsed.bold(),
            self.duration,
            self.slider_value,
            self.slider_max,
            controls.join(" ").cyan()
        )
    }
}

/// Prints the widget state to stdout whenever a timer or control changes.
///
/// Slider moves alone do not redraw; they are shown on the next change.
#[derive(Debug, Default)]
pub struct TerminalView {
    screen: Mutex<Screen>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status line without colors
    pub fn line(&self) -> String {
        colored::control::set_override(false);
        let line = self.screen.lock().render();
        colored::control::unset_override();
        line
    }

    fn redraw(&self, screen: &Screen) {
        println!("{}", screen.render());
    }
}

impl WidgetView for TerminalView {
    fn set_visible(&self, element: Element, visible: bool) {
        let mut screen = self.screen.lock();
        let changed = if visible {
            screen.visible.insert(element)
        } else {
            screen.visible.remove(&element)
        };
        if changed && element == Element::VideoOverlay && visible {
            println!("{} press {} to watch the recording", "▶".green(), "play".bold());
        }
    }

    fn set_text(&self, output: TextOutput, text: &str) {
        let mut screen = self.screen.lock();
        let slot = match output {
            TextOutput::Elapsed => &mut screen.elapsed,
            TextOutput::Duration => &mut screen.duration,
        };
        if slot.as_str() != text {
            *slot = text.to_string();
            self.redraw(&screen);
        }
    }

    fn set_slider_value(&self, value: f64) {
        self.screen.lock().slider_value = value;
    }

    fn set_slider_max(&self, max: f64) {
        self.screen.lock().slider_max = max;
    }

    fn set_image_source(&self, url: &str) {
        println!("{} snapshot ready: {}", "📷".cyan(), url);
    }

    fn show_status(&self, snapshot: &SessionSnapshot) {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{} cannot render status: {}", "✗".red(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_line_shows_placeholders() {
        let view = TerminalView::new();
        let line = view.line();
        assert!(line.contains("-:- / -:-"));
    }

    #[test]
    fn line_lists_visible_controls_only() {
        let view = TerminalView::new();
        view.set_visible(Element::StartRecord, true);
        view.set_visible(Element::Play, true);
        view.set_visible(Element::VideoOverlay, true);

        let line = view.line();
        assert!(line.ends_with("start play"));
        assert!(!line.contains("overlay"));
    }

    #[test]
    fn line_tracks_timers_and_slider() {
        let view = TerminalView::new();
        view.set_slider_max(12.0);
        view.set_slider_value(3.0);
        view.set_text(TextOutput::Elapsed, "00:03");
        view.set_text(TextOutput::Duration, "00:12");

        assert!(view.line().contains("00:03 / 00:12 [3/12]"));
    }
}
