//! Record, stop and play back through the synthetic adapters

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use camrec::application::ports::WidgetView;
use camrec::application::{Control, RecorderWidget, WidgetConfig};
use camrec::domain::widget::{Element, SessionSnapshot, TextOutput};
use camrec::infrastructure::{
    BlobUrlRegistry, ConsoleAlerter, SyntheticDevices, SyntheticProber, TimelineDisplay,
};

#[derive(Default)]
struct Screen {
    visible: HashMap<Element, bool>,
    texts: HashMap<TextOutput, String>,
    slider: (f64, f64),
}

#[derive(Clone, Default)]
struct SharedView(Arc<Mutex<Screen>>);

impl SharedView {
    fn text(&self, output: TextOutput) -> String {
        self.0.lock().texts.get(&output).cloned().unwrap_or_default()
    }

    fn visible(&self, element: Element) -> bool {
        self.0.lock().visible.get(&element).copied().unwrap_or(false)
    }

    fn slider(&self) -> (f64, f64) {
        self.0.lock().slider
    }
}

impl WidgetView for SharedView {
    fn set_visible(&self, element: Element, visible: bool) {
        self.0.lock().visible.insert(element, visible);
    }

    fn set_text(&self, output: TextOutput, text: &str) {
        self.0.lock().texts.insert(output, text.to_string());
    }

    fn set_slider_value(&self, value: f64) {
        self.0.lock().slider.0 = value;
    }

    fn set_slider_max(&self, max: f64) {
        self.0.lock().slider.1 = max;
    }

    fn set_image_source(&self, _url: &str) {}

    fn show_status(&self, _snapshot: &SessionSnapshot) {}
}

type Widget = RecorderWidget<
    SyntheticDevices,
    TimelineDisplay,
    Arc<SyntheticProber>,
    SharedView,
    ConsoleAlerter,
>;

fn widget() -> (Widget, SharedView, Arc<BlobUrlRegistry>) {
    let urls = Arc::new(BlobUrlRegistry::new());
    let prober = Arc::new(SyntheticProber::new());
    let view = SharedView::default();
    let widget = RecorderWidget::new(
        SyntheticDevices::new(Duration::from_secs(1)),
        TimelineDisplay::new(urls.clone()),
        prober,
        view.clone(),
        ConsoleAlerter::new(),
        urls.clone(),
        WidgetConfig::default(),
    );
    (widget, view, urls)
}

/// Step until `done` holds, failing after a bounded number of events
async fn step_until(
    widget: &mut Widget,
    controls: &mut mpsc::Receiver<Control>,
    done: impl Fn(&Widget) -> bool,
) {
    for _ in 0..200 {
        if done(widget) {
            return;
        }
        assert!(widget.step(controls).await, "event loop ended early");
    }
    panic!("condition not reached");
}

#[tokio::test(start_paused = true)]
async fn record_stop_and_play_back() {
    let (mut widget, view, urls) = widget();
    let (tx, mut rx) = mpsc::channel(8);

    widget.initialize_view();
    widget.acquire().await.unwrap();
    assert_eq!(view.text(TextOutput::Elapsed), "-:-");
    assert!(view.visible(Element::StartRecord));

    tx.send(Control::StartRecord).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().is_recording).await;
    assert_eq!(view.text(TextOutput::Elapsed), "00:00");
    assert_eq!(view.text(TextOutput::Duration), "-:-");

    let started = Instant::now();
    step_until(&mut widget, &mut rx, |_| view.text(TextOutput::Elapsed) == "00:03").await;
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(started.elapsed() < Duration::from_secs(4));

    tx.send(Control::StopRecord).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().can_play).await;
    assert!(!widget.flags().is_recording);
    assert_eq!(view.text(TextOutput::Duration), "00:03");
    assert_eq!(view.slider().1, 3.0);
    assert!(view.visible(Element::VideoOverlay));
    assert!(widget.recording().is_some());

    tx.send(Control::Play).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().is_playing).await;
    assert!(!view.visible(Element::VideoOverlay));

    step_until(&mut widget, &mut rx, |w| !w.flags().is_playing).await;
    assert_eq!(view.text(TextOutput::Elapsed), "00:03");
    assert_eq!(view.slider().0, 3.0);
    assert!(view.visible(Element::Play));
    assert!(!view.visible(Element::Pause));

    widget.shutdown();
    assert!(urls.is_empty());
}

#[tokio::test(start_paused = true)]
async fn restart_discards_the_recording() {
    let (mut widget, view, _urls) = widget();
    let (tx, mut rx) = mpsc::channel(8);

    widget.initialize_view();
    widget.acquire().await.unwrap();

    tx.send(Control::StartRecord).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().is_recording).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    tx.send(Control::StopRecord).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().can_play).await;

    tx.send(Control::Restart).await.unwrap();
    step_until(&mut widget, &mut rx, |w| !w.flags().can_play).await;
    assert_eq!(view.slider().0, 0.0);

    // Texts reset once the settle delay has passed
    step_until(&mut widget, &mut rx, |_| view.text(TextOutput::Duration) == "-:-").await;
    assert_eq!(view.text(TextOutput::Elapsed), "-:-");
    assert!(!view.visible(Element::VideoOverlay));

    tx.send(Control::StartRecord).await.unwrap();
    step_until(&mut widget, &mut rx, |w| w.flags().is_recording).await;
}
