use iced::widget::{button, column, container, image as image_widget, row, scrollable, slider, text};
use iced::{Color, Element, Length, Task, Theme};

use crate::detection::model::{self, ModelPaths};
use crate::detection::{DetectionPipeline, preprocessing};
use crate::report::{self, DetectionReport};

use super::Message;
use super::state::{self, AppState, DetectionView, LoadedImage, ModelStatus};

const ERROR_COLOR: Color = Color { r: 0.95, g: 0.38, b: 0.38, a: 1.0 };
const WARNING_COLOR: Color = Color { r: 0.95, g: 0.75, b: 0.30, a: 1.0 };
const SUCCESS_COLOR: Color = Color { r: 0.45, g: 0.85, b: 0.50, a: 1.0 };

pub struct SkinScanApp {
    state: AppState,
}

impl SkinScanApp {
    /// Kick off the one-time model load in the background; the page renders
    /// immediately with the sliders live.
    pub fn new(paths: ModelPaths) -> (Self, Task<Message>) {
        let load = Task::perform(
            async move {
                tokio::task::spawn_blocking(move || model::shared_model(&paths))
                    .await
                    .unwrap_or_else(|e| Err(format!("model loader crashed: {e}")))
            },
            Message::ModelLoaded,
        );

        (
            Self {
                state: AppState::default(),
            },
            load,
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModelLoaded(result) => {
                self.state.model = match result {
                    Ok(model) => ModelStatus::Ready(model),
                    Err(diagnostic) => ModelStatus::Failed(diagnostic),
                };
                Task::none()
            }
            Message::PickImage => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("Images", &["jpg", "jpeg", "png"])
                        .pick_file()
                        .await
                        .map(|file| file.path().to_path_buf())
                },
                Message::ImagePicked,
            ),
            Message::ImagePicked(None) => Task::none(),
            Message::ImagePicked(Some(path)) => {
                match image::open(&path) {
                    Ok(img) => {
                        let original = img.to_rgb8();
                        let preview = state::rgb_handle(&preprocessing::enhance_brightness(
                            &original,
                            self.state.brightness,
                        ));
                        let file_name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        self.state.source = Some(LoadedImage {
                            file_name,
                            original,
                            preview,
                        });
                        // A fresh upload owns the render cycle: previous
                        // results no longer correspond to it.
                        self.state.outcome = None;
                        self.state.error = None;
                    }
                    Err(e) => {
                        self.state.error = Some(format!("Could not read {}: {e}", path.display()));
                    }
                }
                Task::none()
            }
            Message::BrightnessChanged(value) => {
                self.state.brightness = value;
                self.state.outcome = None;
                self.refresh_preview();
                Task::none()
            }
            Message::ConfidenceChanged(value) => {
                self.state.confidence_threshold = value;
                self.state.outcome = None;
                Task::none()
            }
            Message::RunDetection => self.start_detection(),
            Message::DetectionFinished(result) => {
                self.state.is_detecting = false;
                match result {
                    Ok(view) => self.state.outcome = Some(view),
                    Err(e) => self.state.error = Some(e),
                }
                Task::none()
            }
        }
    }

    fn refresh_preview(&mut self) {
        if let Some(source) = &mut self.state.source {
            source.preview = state::rgb_handle(&preprocessing::enhance_brightness(
                &source.original,
                self.state.brightness,
            ));
        }
    }

    /// Snapshot the current (image, brightness, threshold) triple and run the
    /// pipeline on a blocking worker. The model handle is checked here; a
    /// failed load never reaches inference.
    fn start_detection(&mut self) -> Task<Message> {
        if self.state.is_detecting {
            return Task::none();
        }
        let (ModelStatus::Ready(model), Some(source)) = (&self.state.model, &self.state.source)
        else {
            return Task::none();
        };

        let model = model.clone();
        let image = source.original.clone();
        let pipeline = DetectionPipeline::new()
            .with_brightness(self.state.brightness)
            .with_confidence_threshold(self.state.confidence_threshold);

        self.state.is_detecting = true;
        self.state.error = None;

        Task::perform(
            async move {
                let run = tokio::task::spawn_blocking(move || {
                    pipeline
                        .run(model.as_ref(), &image)
                        .map(|outcome| DetectionView {
                            annotated: state::rgb_handle(&outcome.annotated),
                            report: report::build_report(&outcome.detections),
                        })
                        .map_err(|e| format!("{e:#}"))
                })
                .await;

                match run {
                    Ok(result) => result,
                    Err(e) => Err(format!("detection task failed: {e}")),
                }
            },
            Message::DetectionFinished,
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = container(
            column![
                text("Parameters").size(22),
                text(format!("Brightness: {:.2}", self.state.brightness)),
                slider(0.5..=2.0, self.state.brightness, Message::BrightnessChanged).step(0.1),
                text(format!(
                    "Confidence threshold: {:.2}",
                    self.state.confidence_threshold
                )),
                slider(
                    0.1..=1.0,
                    self.state.confidence_threshold,
                    Message::ConfidenceChanged
                )
                .step(0.05),
            ]
            .spacing(12),
        )
        .width(Length::Fixed(250.0))
        .padding(16);

        let mut page = column![
            text("Skin detection and analysis").size(28),
            text("Upload a photo, adjust the brightness, then run the detector."),
        ]
        .spacing(14)
        .padding(20);

        match &self.state.model {
            ModelStatus::Loading => {
                page = page.push(text("Loading detection model..."));
            }
            ModelStatus::Failed(diagnostic) => {
                page = page.push(
                    text(format!("Model failed to load: {diagnostic}")).color(ERROR_COLOR),
                );
            }
            ModelStatus::Ready(_) => {}
        }

        let file_label = self
            .state
            .source
            .as_ref()
            .map(|source| source.file_name.as_str())
            .unwrap_or("No image selected");
        page = page.push(
            row![
                button("Select image...").on_press(Message::PickImage),
                text(file_label),
            ]
            .spacing(12),
        );

        if let Some(error) = &self.state.error {
            page = page.push(text(error.as_str()).color(ERROR_COLOR));
        }

        if let Some(source) = &self.state.source {
            let mut images = row![
                column![
                    text("Input image").size(20),
                    image_widget(source.preview.clone()).width(Length::Fill),
                ]
                .spacing(8)
                .width(Length::FillPortion(1)),
            ]
            .spacing(16);

            if let Some(outcome) = &self.state.outcome {
                images = images.push(
                    column![
                        text("Detection result").size(20),
                        image_widget(outcome.annotated.clone()).width(Length::Fill),
                    ]
                    .spacing(8)
                    .width(Length::FillPortion(1)),
                );
            }
            page = page.push(images);

            let can_detect = matches!(self.state.model, ModelStatus::Ready(_))
                && !self.state.is_detecting;
            let mut controls = row![
                button("Run detection").on_press_maybe(can_detect.then_some(Message::RunDetection)),
            ]
            .spacing(12);
            if self.state.is_detecting {
                controls = controls.push(text("Analyzing..."));
            }
            page = page.push(controls);
        }

        if let Some(outcome) = &self.state.outcome {
            page = page.push(report_view(&outcome.report));
        }

        row![sidebar, scrollable(page).width(Length::Fill)].into()
    }
}

fn report_view(report: &DetectionReport) -> Element<'_, Message> {
    match report {
        DetectionReport::NoDetections { advisory } => {
            text(advisory.as_str()).color(WARNING_COLOR).into()
        }
        DetectionReport::Detected { summary, rows } => {
            let mut table = column![
                text(summary.as_str()).color(SUCCESS_COLOR),
                row![
                    text("#").width(Length::Fixed(50.0)),
                    text("Class").width(Length::FillPortion(2)),
                    text("Confidence").width(Length::FillPortion(2)),
                ]
                .spacing(8),
            ]
            .spacing(6);

            for entry in rows {
                table = table.push(
                    row![
                        text(entry.index.to_string()).width(Length::Fixed(50.0)),
                        text(entry.class_name.as_str()).width(Length::FillPortion(2)),
                        text(entry.confidence.as_str()).width(Length::FillPortion(2)),
                    ]
                    .spacing(8),
                );
            }
            table.into()
        }
    }
}
