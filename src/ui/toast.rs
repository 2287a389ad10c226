//! Transient on-screen notifications.
//!
//! One message at a time, auto-dismissed after a fixed delay (errors
//! linger longer). If no UI surface exists the message falls back to the
//! log so it is never silently dropped.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::constants::timing;

use super::theme::colors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

struct ActiveToast {
    message: String,
    kind: ToastKind,
    timer: Timer,
}

/// Single-slot toast; a new message replaces the current one.
#[derive(Resource, Default)]
pub struct Toast {
    active: Option<ActiveToast>,
}

impl Toast {
    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        let seconds = match kind {
            ToastKind::Error => timing::TOAST_ERROR_SECS,
            _ => timing::TOAST_SECS,
        };
        self.active = Some(ActiveToast {
            message: message.into(),
            kind,
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        });
    }

    /// The visible message, if any.
    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.message.as_str())
    }

    pub fn kind(&self) -> Option<ToastKind> {
        self.active.as_ref().map(|active| active.kind)
    }
}

pub struct ToastPlugin;

impl Plugin for ToastPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Toast>()
            .add_systems(Update, tick_toast)
            .add_systems(EguiPrimaryContextPass, draw_toast);
    }
}

fn tick_toast(time: Res<Time>, mut toast: ResMut<Toast>) {
    if let Some(active) = &mut toast.active {
        if active.timer.tick(time.delta()).finished() {
            toast.active = None;
        }
    }
}

fn draw_toast(mut contexts: EguiContexts, mut toast: ResMut<Toast>) {
    let Some(active) = &toast.active else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        // No notification surface; the log is the fallback.
        match active.kind {
            ToastKind::Error => error!("{}", active.message),
            ToastKind::Warning => warn!("{}", active.message),
            ToastKind::Success => info!("{}", active.message),
        }
        toast.active = None;
        return;
    };

    let fill = match active.kind {
        ToastKind::Success => colors::TOAST_SUCCESS_BG,
        ToastKind::Warning => colors::TOAST_WARNING_BG,
        ToastKind::Error => colors::TOAST_ERROR_BG,
    };

    egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
        .show(ctx, |ui| {
            egui::Frame::popup(&ctx.style()).fill(fill).show(ui, |ui| {
                ui.label(egui::RichText::new(&active.message).color(colors::TEXT_PRIMARY));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outlive_successes() {
        let mut toast = Toast::default();
        toast.success("ok");
        let success_timer = toast.active.as_ref().unwrap().timer.duration();
        toast.error("bad");
        let error_timer = toast.active.as_ref().unwrap().timer.duration();
        assert!(error_timer > success_timer);
        assert_eq!(toast.kind(), Some(ToastKind::Error));
    }

    #[test]
    fn a_new_message_replaces_the_current_one() {
        let mut toast = Toast::default();
        toast.warning("first");
        toast.success("second");
        assert_eq!(toast.message(), Some("second"));
    }
}
