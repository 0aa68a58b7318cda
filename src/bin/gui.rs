#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use co2_reimbursement_toolbox::{
    config, i18n,
    i18n::keys,
    logging,
    reimbursement::{
        charts::{self, BarChart, ChartLayout, Rgb},
        compute,
        report::{LineUnit, Report},
        scenario::{fraction_to_percent, percent_to_fraction},
        Parameter, Scenario,
    },
    units::MoneyUnit,
};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tracing::{info, warn};

/// 그래프 한 장의 높이(px).
const CHART_HEIGHT: f32 = 220.0;

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/it/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }
    logging::init("warn");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1180.0, 780.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(%err, "config unreadable, using defaults");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "CO2 Reimbursement Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png", "../../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 폰트 뒤에 붙여 라틴 문자는 기본 글꼴을 유지한다.
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 라벨을 위해 보조 폰트를 찾는다.
/// 1) assets/fonts/ 2) Windows 시스템 폰트 3) 일반적인 리눅스 CJK 폰트 경로
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/truetype/nanum/NanumGothic.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.insert(1, fonts.join("malgun.ttf"));
        candidates.insert(2, fonts.join("gulim.ttc"));
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            info!(path = %p.display(), "cjk font loaded");
            return Ok(());
        }
    }
    Err("CJK font not found; Korean labels may not render.".into())
}

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// y값을 그래프 영역의 화면 좌표로 옮긴다.
fn value_to_y(value: f64, (lo, hi): (f64, f64), top: f32, bottom: f32) -> f32 {
    let span = (hi - lo).max(f64::EPSILON);
    let t = ((value - lo) / span).clamp(0.0, 1.0) as f32;
    bottom - t * (bottom - top)
}

/// 막대가 놓일 슬롯 번호. 누적 그래프는 전체 막대 위에 구간을 겹쳐 한 슬롯에 그린다.
fn bar_slot(layout: ChartLayout, index: usize) -> usize {
    match layout {
        ChartLayout::Grouped => index,
        ChartLayout::Stacked => 0,
    }
}

fn slot_count(chart: &BarChart) -> usize {
    match chart.layout {
        ChartLayout::Grouped => chart.bars.len().max(1),
        ChartLayout::Stacked => 1,
    }
}

/// egui painter로 막대 그래프 하나를 그린다.
fn draw_bar_chart(ui: &mut egui::Ui, chart: &BarChart, tr: &i18n::Translator) {
    ui.strong(chart.title(tr));
    let width = ui.available_width().max(240.0);
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(12.0);

    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(48.0, 18.0),
        rect.max - egui::vec2(8.0, 22.0),
    );
    let range = chart.value_range();
    let zero_y = value_to_y(0.0, range, plot.top(), plot.bottom());
    painter.line_segment(
        [egui::pos2(plot.left(), zero_y), egui::pos2(plot.right(), zero_y)],
        egui::Stroke::new(1.0, text_color),
    );
    painter.text(
        egui::pos2(plot.left() - 4.0, plot.top()),
        egui::Align2::RIGHT_CENTER,
        format!("{:.1}", range.1),
        font.clone(),
        text_color,
    );
    painter.text(
        egui::pos2(plot.left() - 4.0, zero_y),
        egui::Align2::RIGHT_CENTER,
        "0",
        font.clone(),
        text_color,
    );
    painter.text(
        egui::pos2(rect.left(), rect.top()),
        egui::Align2::LEFT_TOP,
        &chart.y_unit,
        font.clone(),
        text_color,
    );

    let slots = slot_count(chart) as f32;
    let slot_w = plot.width() / slots;
    let bar_w = slot_w * 0.5;
    for (index, bar) in chart.bars.iter().enumerate() {
        let slot = bar_slot(chart.layout, index) as f32;
        let cx = plot.left() + slot_w * (slot + 0.5);
        let y0 = value_to_y(bar.base, range, plot.top(), plot.bottom());
        let y1 = value_to_y(bar.base + bar.value, range, plot.top(), plot.bottom());
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(cx - bar_w / 2.0, y0.min(y1)),
            egui::pos2(cx + bar_w / 2.0, y0.max(y1)),
        );
        painter.rect_filled(bar_rect, 2.0, color(bar.color));

        let label = tr.t(bar.label_key);
        if chart.layout == ChartLayout::Stacked && index > 0 {
            painter.text(
                egui::pos2(bar_rect.right() + 6.0, bar_rect.center().y),
                egui::Align2::LEFT_CENTER,
                format!("{label}: {:.1}", bar.value),
                font.clone(),
                text_color,
            );
        } else {
            painter.text(
                egui::pos2(cx, y0.min(y1) - 2.0),
                egui::Align2::CENTER_BOTTOM,
                format!("{:.2}", bar.value),
                font.clone(),
                text_color,
            );
            painter.text(
                egui::pos2(cx, plot.bottom() + 4.0),
                egui::Align2::CENTER_TOP,
                label,
                font.clone(),
                text_color,
            );
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    scenario: Scenario,
    report: Option<Report>,
    charts: Vec<BarChart>,
    error_text: Option<String>,
    status: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
    window_alpha: f32,
    money_unit: MoneyUnit,
    lang_save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let mut app = Self {
            scenario: config.scenario,
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            money_unit: config.display.money_unit,
            config,
            tr,
            report: None,
            charts: Vec::new(),
            error_text: None,
            status: None,
            show_settings_modal: false,
            lang_save_status: None,
        };
        app.recompute();
        app
    }

    /// 현재 입력으로 결과와 그래프를 다시 만든다. 실패 시 이전 결과를 지운다.
    fn recompute(&mut self) {
        self.report = None;
        self.charts.clear();
        if let Err(v) = self.scenario.validate() {
            let mut msg = self.tr.t(keys::VALIDATION_HEADING);
            for violation in &v.violations {
                msg.push_str(&format!(
                    "\n- {}: {violation}",
                    self.tr.t(violation.parameter.label_key())
                ));
            }
            self.error_text = Some(msg);
            return;
        }
        match compute(self.scenario.to_model_input()) {
            Ok(result) => {
                self.report = Some(Report::build(&self.scenario, &result, self.money_unit));
                self.charts = charts::all_charts(&self.scenario, &result, self.money_unit).to_vec();
                self.error_text = None;
            }
            Err(e) => {
                self.error_text = Some(format!("{} {e}", self.tr.t(keys::RESULT_MODEL_ERROR)));
            }
        }
    }

    /// 설정 창의 값을 설정 파일에 저장하고 번역기를 다시 만든다.
    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.display.money_unit = self.money_unit;
        self.config.scenario = self.scenario;
        // 즉시 번역기 반영
        let resolved = i18n::resolve_language("auto", Some(self.config.language.as_str()));
        self.tr =
            i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.lang_save_status = Some(match self.config.save() {
            Ok(()) => match self.config.path() {
                Some(path) => format!("{} {}", self.tr.t(keys::SETTINGS_SAVED), path.display()),
                None => self.tr.t(keys::SETTINGS_SAVED),
            },
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
        self.recompute();
    }

    fn export_report(&mut self) {
        let Some(report) = &self.report else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("co2_reimbursement_report.toml")
            .save_file()
        else {
            return;
        };
        self.status = Some(match report.export_toml(&path) {
            Ok(()) => format!("{} {}", self.tr.t(keys::GUI_EXPORT_DONE), path.display()),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_INPUTS));
        ui.separator();
        let mut changed = false;
        egui::Grid::new("inputs")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for p in Parameter::ALL {
                    label_with_tip(ui, &tr.t(p.label_key()), p.key());
                    let s = &mut self.scenario;
                    let resp = match p {
                        Parameter::GasShare | Parameter::GasEfficiency => {
                            let min = if p == Parameter::GasEfficiency { 1.0 } else { 0.0 };
                            let mut pct = fraction_to_percent(s.get(p));
                            let r = ui.add(
                                egui::Slider::new(&mut pct, min..=100.0)
                                    .suffix(" %")
                                    .fixed_decimals(1),
                            );
                            if r.changed() {
                                s.set(p, percent_to_fraction(pct));
                            }
                            r
                        }
                        Parameter::EmissionFactor => {
                            let mut v = s.get(p);
                            let r = ui.add(
                                egui::DragValue::new(&mut v)
                                    .speed(0.005)
                                    .clamp_range(0.0..=1.0)
                                    .fixed_decimals(3),
                            );
                            s.set(p, v);
                            r
                        }
                        Parameter::TradedEnergy => {
                            let mut v = s.get(p);
                            let r = ui.add(
                                egui::DragValue::new(&mut v)
                                    .speed(100_000.0)
                                    .clamp_range(1.0..=f64::MAX)
                                    .fixed_decimals(0)
                                    .suffix(" MWh"),
                            );
                            s.set(p, v);
                            r
                        }
                        _ => {
                            let mut v = s.get(p);
                            let r = ui.add(
                                egui::DragValue::new(&mut v)
                                    .speed(0.5)
                                    .clamp_range(0.0..=f64::MAX)
                                    .fixed_decimals(2),
                            );
                            s.set(p, v);
                            r
                        }
                    };
                    changed |= resp.changed();
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_COMPUTE)).clicked() || changed {
                self.recompute();
            }
            if ui.button(tr.t(keys::GUI_RESET)).clicked() {
                self.scenario = Scenario::default();
                self.recompute();
            }
        });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        if let Some(err) = &self.error_text {
            ui.colored_label(ui.visuals().error_fg_color, err);
            return;
        }
        let Some(report) = &self.report else {
            return;
        };
        let decimals = self.config.display.decimals;
        ui.heading(tr.t(keys::RESULT_HEADING));
        egui::Grid::new("results")
            .num_columns(2)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for line in &report.lines {
                    ui.label(tr.t(line.label_key));
                    let text = Report::format_line(line, decimals);
                    if line.unit == LineUnit::Ratio {
                        ui.strong(text);
                    } else {
                        ui.monospace(text);
                    }
                    ui.end_row();
                }
            });
        ui.add_space(6.0);
        ui.colored_label(
            egui::Color32::from_rgb(0x2a, 0x9d, 0x8f),
            egui::RichText::new(format!(
                "{} {:.2}%",
                tr.t(keys::RESULT_PERCENT_SAVING),
                report.percent_saving
            ))
            .strong(),
        );
        for w in &report.warnings {
            ui.colored_label(ui.visuals().warn_fg_color, tr.t(w.message_key()));
        }
        ui.small(tr.t(keys::NOTE_LEVERAGE));
        ui.small(tr.t(keys::NOTE_INDICATIVE));

        let mut export_clicked = false;
        ui.horizontal(|ui| {
            export_clicked = ui.button(tr.t(keys::GUI_EXPORT)).clicked();
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
        if export_clicked {
            self.export_report();
        }

        if !self.charts.is_empty() {
            ui.separator();
            ui.heading(tr.t(keys::GUI_CHARTS));
            for chart in &self.charts {
                draw_bar_chart(ui, chart, &tr);
                ui.add_space(10.0);
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::GUI_APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
            });
            ui.small(tr.t(keys::APP_DISCLAIMER));
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_clicked = false;
            egui::Window::new(tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::GUI_SETTINGS_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                tr.t(keys::GUI_SETTINGS_LANGUAGE_AUTO),
                            );
                            ui.selectable_value(&mut self.lang_input, "it".into(), "Italiano");
                            ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        });
                    ui.separator();
                    ui.label(tr.t(keys::GUI_SETTINGS_MONEY_UNIT));
                    ui.horizontal(|ui| {
                        for unit in MoneyUnit::ALL {
                            ui.selectable_value(&mut self.money_unit, unit, unit.symbol());
                        }
                    });
                    ui.separator();
                    ui.label(tr.t(keys::GUI_SETTINGS_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    save_clicked = ui.button(tr.t(keys::GUI_SETTINGS_SAVE)).clicked();
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
            if save_clicked {
                self.save_settings();
            }
        }
        if matches!(&self.report, Some(r) if r.money_unit != self.money_unit) {
            self.recompute();
        }

        // 좌측 입력 + 본문
        egui::SidePanel::left("inputs_panel")
            .resizable(true)
            .min_width(320.0)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_inputs(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_results(ui));
        });
    }
}
