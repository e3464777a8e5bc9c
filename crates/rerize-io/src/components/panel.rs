//! The resizer panel: upload, dimension form, status and download.

use dioxus::prelude::*;
use rerize_core::{
    ImageBackend, ResizeError, ResizeSettings, Resizer, SubmitOutcome, resize_and_encode,
};
use web_time::Instant;

use crate::blob::{BlobUrl, preview_mime_type};
use crate::components::{DimensionControls, DownloadLink, DropZone, StatusBanner};
use crate::download;

/// Props for the [`ResizerPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResizerPanelProps {
    /// Resampling, encoding and naming settings.
    #[props(default)]
    settings: ResizeSettings,
}

/// Milliseconds until `deadline`, for `setTimeout`.
fn millis_until(deadline: Instant, now: Instant) -> u32 {
    let wait = deadline.saturating_duration_since(now);
    u32::try_from(wait.as_millis()).unwrap_or(u32::MAX)
}

/// Upload an image, pick a size, resize, download.
///
/// All state lives in one [`Resizer`] signal. Object URLs are owned by
/// the state and revoked when superseded or when the panel unmounts.
#[component]
#[allow(clippy::too_many_lines)]
pub fn ResizerPanel(props: ResizerPanelProps) -> Element {
    let settings = props.settings.clone();
    let mut state = use_signal(move || Resizer::<BlobUrl>::new(settings));

    // Clear the current error once its deadline passes. Expiring at the
    // scheduled deadline (not "now") makes a timer for an older error a
    // no-op once a newer error has moved the deadline.
    let schedule_expiry = move |deadline: Instant| {
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(millis_until(deadline, Instant::now())).await;
            state.write().expire_error(deadline);
        });
    };

    let mut on_read_error = move |()| {
        let deadline = state.write().report_read_failure(Instant::now());
        schedule_expiry(deadline);
    };

    let on_file = move |(bytes, name, content_type): (Vec<u8>, String, Option<String>)| {
        let mime = preview_mime_type(content_type.as_deref(), &bytes);
        match BlobUrl::from_bytes(&bytes, mime) {
            Ok(url) => state.write().accept_upload(name, bytes, url),
            Err(e) => {
                tracing::error!(%name, error = %e, "could not create preview URL");
                on_read_error(());
            }
        }
    };

    let on_drag = move |over: bool| {
        if over {
            state.write().drag_over();
        } else {
            state.write().drag_leave();
        }
    };

    let on_submit = move |()| {
        let begun = state.write().begin_submit(Instant::now());
        let request = match begun {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "submit rejected");
                if e.is_displayed() {
                    if let Some(deadline) = state.peek().status().deadline() {
                        schedule_expiry(deadline);
                    }
                }
                return;
            }
        };

        spawn(async move {
            // Let the browser paint "Loading..." before the synchronous
            // resample blocks the thread.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let settings = state.peek().settings().clone();
            let backend = ImageBackend::new(settings.filter);
            let outcome = resize_and_encode(&backend, &request.source, request.target, &settings)
                .and_then(|bytes| {
                    BlobUrl::from_bytes(&bytes, settings.format.mime_type())
                        .map_err(ResizeError::from)
                });

            let finished = state
                .write()
                .finish_submit(request.ticket, outcome, Instant::now());

            match finished {
                SubmitOutcome::Completed { filename, .. } => {
                    let href = state
                        .peek()
                        .artifact()
                        .map(|artifact| artifact.url().as_str().to_owned());
                    if let Some(href) = href {
                        if let Err(e) = download::trigger_download(&href, &filename) {
                            tracing::warn!(error = %e, "automatic download failed");
                        }
                    }
                }
                SubmitOutcome::Failed => {
                    if let Some(deadline) = state.peek().status().deadline() {
                        schedule_expiry(deadline);
                    }
                }
                SubmitOutcome::Stale => {}
            }
        });
    };

    let current = state.read();
    let preview = current.preview().map(|url| url.as_str().to_owned());
    let dragging = current.is_dragging();
    let error = current.status().error().map(str::to_owned);
    let loading = current.status().is_loading();
    let width = current.dimensions().width();
    let height = current.dimensions().height();
    let locked = current.dimensions().is_locked();
    let blank = current.dimensions().is_blank();
    let link = current
        .artifact()
        .map(|artifact| (artifact.url().as_str().to_owned(), artifact.filename().to_owned()));
    drop(current);

    rsx! {
        div { class: "panel",
            StatusBanner { error }

            DropZone {
                preview,
                dragging,
                on_file,
                on_read_error,
                on_drag,
                on_delete: move |()| state.write().delete_image(),
            }

            div { class: "panel__controls",
                DimensionControls {
                    width,
                    height,
                    locked,
                    blank,
                    loading,
                    on_width: move |w| state.write().set_width(w),
                    on_height: move |h| state.write().set_height(h),
                    on_toggle_lock: move |()| state.write().toggle_lock(),
                    on_submit,
                }

                if let Some((href, filename)) = link {
                    DownloadLink { href, filename }
                }
            }
        }
    }
}
