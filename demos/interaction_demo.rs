#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use egui::{Pos2, Rect};

use egui_interaction::{
    Decision, DragEvent, DropPosition, DropTarget, EventKind, Glyph, HostEvent,
    InteractionController, StartOptions, Viewport,
};

const ROW_COUNT: usize = 6;

fn row_id(index: usize) -> egui::Id {
    egui::Id::new(("demo_row", index))
}

struct Reorder {
    from: usize,
    to: usize,
    position: DropPosition,
}

/// State shared between the app and the registered drop handlers.
#[derive(Default)]
struct DemoModel {
    /// Row screen rects, refreshed every frame while the list is drawn.
    row_rects: Vec<Rect>,
    /// Reorder recorded by a drop handler, applied by the app afterwards.
    pending: Option<Reorder>,
}

struct RowTarget {
    index: usize,
    model: Rc<RefCell<DemoModel>>,
}

impl DropTarget for RowTarget {
    fn on_drag_event(
        &mut self,
        event: &DragEvent<'_>,
        _context: &mut egui_interaction::ContextSlot<'_>,
    ) -> Decision {
        match event.kind {
            EventKind::Enter | EventKind::Over => {
                let model = self.model.borrow();
                let Some(rect) = model.row_rects.get(self.index).copied() else {
                    return Decision::Proceed;
                };
                // Dropping on a row means inserting above or below its midline.
                if event.pointer.y < rect.center().y {
                    Decision::AcceptAt(DropPosition::Before)
                } else {
                    Decision::AcceptAt(DropPosition::After)
                }
            }
            EventKind::Drop => {
                if let (Some(position), Some(&from)) = (event.accepted, event.payload_as::<usize>())
                {
                    self.model.borrow_mut().pending = Some(Reorder {
                        from,
                        to: self.index,
                        position,
                    });
                }
                Decision::Proceed
            }
            _ => Decision::Proceed,
        }
    }
}

/// Hit testing against the row rects recorded this frame.
struct RowViewport {
    rows: Vec<(egui::Id, Rect)>,
}

impl Viewport for RowViewport {
    fn element_at(&self, global: Pos2) -> Option<egui::Id> {
        self.rows
            .iter()
            .find(|(_, rect)| rect.contains(global))
            .map(|(id, _)| *id)
    }

    fn bounds_of(&self, element: egui::Id) -> Option<Rect> {
        self.rows
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, rect)| *rect)
    }
}

struct App {
    controller: InteractionController,
    model: Rc<RefCell<DemoModel>>,
    items: Vec<String>,
}

impl Default for App {
    fn default() -> Self {
        let model = Rc::new(RefCell::new(DemoModel::default()));
        let mut controller = InteractionController::new();
        for index in 0..ROW_COUNT {
            controller.registry_mut().register_target(
                row_id(index),
                None,
                Box::new(RowTarget {
                    index,
                    model: Rc::clone(&model),
                }),
            );
        }
        Self {
            controller,
            model,
            items: (1..=ROW_COUNT).map(|n| format!("Item {n}")).collect(),
        }
    }
}

impl App {
    fn apply_pending_reorder(&mut self) {
        let Some(reorder) = self.model.borrow_mut().pending.take() else {
            return;
        };
        if reorder.from >= self.items.len() {
            return;
        }
        let item = self.items.remove(reorder.from);
        let mut insert = match reorder.position {
            DropPosition::Before => reorder.to,
            DropPosition::Over | DropPosition::After => reorder.to + 1,
        };
        if reorder.from < insert {
            insert -= 1;
        }
        self.items.insert(insert.min(self.items.len()), item);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("interaction_demo_help").show(ctx, |ui| {
            ui.add(
                egui::Label::new(
                    "Drag a row to reorder the list. The insertion line shows where it will land; \
                     press Escape to cancel the drag.",
                )
                .selectable(false),
            );
        });

        self.model.borrow_mut().row_rects.clear();
        egui::CentralPanel::default().show(ctx, |ui| {
            for (index, item) in self.items.iter().enumerate() {
                let response = ui.add(
                    egui::Button::new(item)
                        .min_size(egui::vec2(ui.available_width(), 28.0))
                        .sense(egui::Sense::click_and_drag()),
                );
                self.model.borrow_mut().row_rects.push(response.rect);

                if response.drag_started() && !self.controller.is_active() {
                    let pointer = response.interact_pointer_pos().unwrap_or(response.rect.center());
                    let modifiers = ui.input(|i| i.modifiers);
                    self.controller.start(
                        pointer,
                        modifiers,
                        StartOptions::default().payload(index).glyph(Glyph::Move),
                    );
                }
            }
        });

        let viewport = RowViewport {
            rows: (0..self.items.len())
                .filter_map(|index| {
                    let rect = self.model.borrow().row_rects.get(index).copied()?;
                    Some((row_id(index), rect))
                })
                .collect(),
        };

        ctx.input(|i| {
            if !i.focused {
                self.controller.handle(HostEvent::FocusLost, &viewport);
            }
            if i.key_pressed(egui::Key::Escape) {
                self.controller.handle(HostEvent::CancelKey, &viewport);
            }
            if let Some(pos) = i.pointer.latest_pos() {
                if i.pointer.primary_released() {
                    self.controller.handle(
                        HostEvent::PointerReleased {
                            pos,
                            modifiers: i.modifiers,
                        },
                        &viewport,
                    );
                } else if self.controller.is_active() {
                    self.controller.handle(
                        HostEvent::PointerMoved {
                            pos,
                            modifiers: i.modifiers,
                        },
                        &viewport,
                    );
                }
            }
            self.controller.pump_tickers(i.time);
        });

        self.apply_pending_reorder();

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("interaction_demo_cues"),
        ));
        self.controller.paint(&painter, &ctx.style().visuals);

        if self.controller.is_active() {
            ctx.request_repaint();
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 360.0])
            .with_title("egui_interaction demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_interaction demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
