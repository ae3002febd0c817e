use libadwaita as adw;
use adw::prelude::*;
use adw::Application;
use bmi_core::{
    gauge_value, record_measurement, BmiCategory, Config, Error, HistoryStore, PlotArea,
    Submission, TrendSeries, GAUGE_MAX,
};
use gtk::cairo;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

const STYLESHEET: &str = "
.bmi-heading { font-size: 28pt; font-weight: bold; }
.bmi-field { font-size: 14pt; }
.bmi-result { font-size: 16pt; }
levelbar.underweight block.filled { background-color: #17a2b8; }
levelbar.normal-weight block.filled { background-color: #28a745; }
levelbar.overweight block.filled { background-color: #ffc107; }
levelbar.obesity block.filled { background-color: #dc3545; }
";

const LINE_RGB: (f64, f64, f64) = (0x20 as f64 / 255.0, 0x63 as f64 / 255.0, 0x9B as f64 / 255.0);

/// Widgets the calculate handler reads from and writes to
#[derive(Clone)]
struct FormWidgets {
    window: adw::ApplicationWindow,
    weight: gtk::Entry,
    height: gtk::Entry,
    age: gtk::Entry,
    result: gtk::Label,
    gauge: gtk::LevelBar,
    chart: gtk::DrawingArea,
}

struct UiState {
    store: HistoryStore,
    series: TrendSeries,
}

fn main() -> glib::ExitCode {
    bmi_core::logging::init_file(&bmi_core::logging::default_log_path());

    let app = Application::builder()
        .application_id("com.bmitracker.Calculator")
        .build();

    app.connect_startup(|_| load_css());
    app.connect_activate(build_window);

    app.run()
}

fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLESHEET);

    match gtk::gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => tracing::warn!("No display available; gauge colours disabled"),
    }
}

fn open_store() -> HistoryStore {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}; using defaults.", e);
            Config::default()
        }
    };
    let store = HistoryStore::new(config.history_path());
    tracing::info!("Using history file {:?}", store.path());
    store
}

fn build_window(app: &Application) {
    let store = open_store();
    let series = TrendSeries::new(store.load_all());
    let state = Rc::new(RefCell::new(UiState { store, series }));

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .default_width(800)
        .default_height(650)
        .title("BMI Calculator")
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(20);
    content.set_margin_bottom(20);
    content.set_margin_start(20);
    content.set_margin_end(20);
    window.set_content(Some(&content));

    let heading = gtk::Label::new(Some("BMI Calculator"));
    heading.add_css_class("bmi-heading");
    heading.set_margin_bottom(13);
    content.append(&heading);

    // Labelled entries on one row
    let grid = gtk::Grid::new();
    grid.set_column_spacing(10);
    grid.set_row_spacing(10);
    grid.set_halign(gtk::Align::Center);
    content.append(&grid);

    let weight = labelled_entry(&grid, 0, "Weight (kg):");
    let height = labelled_entry(&grid, 2, "Height (ft):");
    let age = labelled_entry(&grid, 4, "Age (yrs):");

    let result = gtk::Label::new(None);
    result.add_css_class("bmi-result");
    content.append(&result);

    let gauge = gtk::LevelBar::for_interval(0.0, GAUGE_MAX);
    for offset in ["low", "high", "full"] {
        gauge.remove_offset_value(Some(offset));
    }
    gauge.set_size_request(450, 16);
    gauge.set_halign(gtk::Align::Center);
    gauge.set_margin_bottom(10);
    content.append(&gauge);

    let calculate = gtk::Button::with_label("Calculate BMI");
    calculate.add_css_class("suggested-action");
    calculate.set_halign(gtk::Align::Center);
    calculate.set_width_request(200);
    content.append(&calculate);

    let chart = gtk::DrawingArea::new();
    chart.set_content_width(650);
    chart.set_content_height(350);
    chart.set_vexpand(true);
    chart.set_margin_top(15);
    content.append(&chart);

    {
        let state = state.clone();
        chart.set_draw_func(move |_, cr, width, height| {
            if let Err(err) = draw_chart(cr, &state.borrow().series, width, height) {
                tracing::warn!("Failed to draw trend chart: {}", err);
            }
        });
    }

    let widgets = FormWidgets {
        window: window.clone(),
        weight,
        height,
        age,
        result,
        gauge,
        chart,
    };

    {
        let widgets = widgets.clone();
        let state = state.clone();
        calculate.connect_clicked(move |_| on_calculate(&widgets, &state));
    }

    // Enter in any field submits the form
    for entry in [&widgets.weight, &widgets.height, &widgets.age] {
        let calculate = calculate.clone();
        entry.connect_activate(move |_| calculate.emit_clicked());
    }

    window.present();
}

fn labelled_entry(grid: &gtk::Grid, column: i32, text: &str) -> gtk::Entry {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("bmi-field");
    label.set_halign(gtk::Align::End);

    let entry = gtk::Entry::new();
    entry.add_css_class("bmi-field");
    entry.set_width_chars(12);

    grid.attach(&label, column, 0, 1, 1);
    grid.attach(&entry, column + 1, 0, 1, 1);
    entry
}

fn on_calculate(widgets: &FormWidgets, state: &Rc<RefCell<UiState>>) {
    let now = chrono::Local::now().naive_local();

    let outcome = {
        let state = state.borrow();
        record_measurement(
            &state.store,
            &widgets.weight.text(),
            &widgets.height.text(),
            &widgets.age.text(),
            now,
        )
    };

    match outcome {
        Ok(submission) => show_submission(widgets, state, submission),
        Err(Error::Validation(e)) => show_error(&widgets.window, &e.to_string()),
        Err(e) => {
            tracing::error!("Failed to record measurement: {}", e);
            show_error(
                &widgets.window,
                &format!("Could not save the measurement: {}", e),
            );
        }
    }
}

fn show_submission(widgets: &FormWidgets, state: &Rc<RefCell<UiState>>, submission: Submission) {
    let assessment = submission.assessment;

    widgets.result.set_text(&assessment.summary());

    widgets.gauge.set_value(gauge_value(assessment.bmi));
    for category in BmiCategory::ALL {
        widgets.gauge.remove_css_class(category_css_class(category));
    }
    widgets
        .gauge
        .add_css_class(category_css_class(assessment.category));

    state.borrow_mut().series = TrendSeries::new(submission.history);
    widgets.chart.queue_draw();
}

#[allow(deprecated)]
fn show_error(window: &adw::ApplicationWindow, message: &str) {
    let dialog = gtk::MessageDialog::builder()
        .transient_for(window)
        .modal(true)
        .message_type(gtk::MessageType::Error)
        .buttons(gtk::ButtonsType::Ok)
        .text("Error")
        .secondary_text(message)
        .build();
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}

fn category_css_class(category: BmiCategory) -> &'static str {
    match category {
        BmiCategory::Underweight => "underweight",
        BmiCategory::NormalWeight => "normal-weight",
        BmiCategory::Overweight => "overweight",
        BmiCategory::Obesity => "obesity",
    }
}

fn draw_chart(
    cr: &cairo::Context,
    series: &TrendSeries,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.paint()?;

    if !series.is_plottable() {
        return Ok(());
    }

    let area = PlotArea::with_margins(width as f64, height as f64, 56.0, 36.0, 24.0, 48.0);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);

    // Title
    cr.set_source_rgb(0.1, 0.1, 0.1);
    cr.set_font_size(14.0);
    draw_centered_text(cr, "BMI Trend Over Time", area.left + area.width / 2.0, 22.0)?;

    // Horizontal grid with y labels
    cr.set_font_size(10.0);
    cr.set_line_width(1.0);
    for tick in series.y_ticks(5) {
        let Some(y) = series.y_position(&area, tick) else {
            continue;
        };
        cr.set_source_rgba(0.0, 0.0, 0.0, 0.12);
        cr.move_to(area.left, y);
        cr.line_to(area.right(), y);
        cr.stroke()?;

        let label = format!("{:.1}", tick);
        let extents = cr.text_extents(&label)?;
        cr.set_source_rgb(0.3, 0.3, 0.3);
        cr.move_to(area.left - extents.width() - 6.0, y + extents.height() / 2.0);
        cr.show_text(&label)?;
    }

    // Vertical grid with entry numbers
    for entry in series.x_ticks(10) {
        let Some(x) = series.x_position(&area, entry) else {
            continue;
        };
        cr.set_source_rgba(0.0, 0.0, 0.0, 0.12);
        cr.move_to(x, area.top);
        cr.line_to(x, area.bottom());
        cr.stroke()?;

        cr.set_source_rgb(0.3, 0.3, 0.3);
        draw_centered_text(cr, &entry.to_string(), x, area.bottom() + 14.0)?;
    }

    // Axis titles
    cr.set_font_size(11.0);
    cr.set_source_rgb(0.1, 0.1, 0.1);
    draw_centered_text(cr, "Entry #", area.left + area.width / 2.0, area.bottom() + 34.0)?;
    cr.save()?;
    cr.translate(14.0, area.top + area.height / 2.0);
    cr.rotate(-PI / 2.0);
    draw_centered_text(cr, "BMI", 0.0, 0.0)?;
    cr.restore()?;

    // Line and markers
    let points = series.project(&area);
    let (r, g, b) = LINE_RGB;
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(2.0);
    if let Some(&(x, y)) = points.first() {
        cr.move_to(x, y);
        for &(x, y) in &points[1..] {
            cr.line_to(x, y);
        }
        cr.stroke()?;
    }
    for &(x, y) in &points {
        cr.arc(x, y, 4.0, 0.0, 2.0 * PI);
        cr.fill()?;
    }

    Ok(())
}

fn draw_centered_text(cr: &cairo::Context, text: &str, x: f64, y: f64) -> Result<(), cairo::Error> {
    let extents = cr.text_extents(text)?;
    cr.move_to(x - extents.width() / 2.0 - extents.x_bearing(), y);
    cr.show_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_a_distinct_style() {
        let classes: HashSet<_> = BmiCategory::ALL
            .into_iter()
            .map(category_css_class)
            .collect();
        assert_eq!(classes.len(), BmiCategory::ALL.len());
        for class in classes {
            assert!(STYLESHEET.contains(&format!("levelbar.{} ", class)));
        }
    }
}
