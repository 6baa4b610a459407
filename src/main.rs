mod app;
mod config;
mod download;
mod error;
mod preview;
mod upload;
mod utils;

use app::EndcardConverter;
use eframe::CreationContext;

fn main() -> Result<(), eframe::Error> {
    // An edit link (or bare endcard_id) may be passed on the command line
    // to continue editing an existing record.
    let edit_target = std::env::args().nth(1);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([680.0, 760.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EndCard Converter Pro",
        options,
        Box::new(move |cc: &CreationContext| Box::new(EndcardConverter::new(cc, edit_target))),
    )
}
