//! Integration test: drive the resizer panel through upload, edit,
//! submit and expiry with the real image backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use rerize_core::{
    Dimensions, ImageBackend, ResizeError, ResizeSettings, Resizer, SubmitError, SubmitOutcome,
    probe_dimensions, resize_and_encode,
};
use web_time::{Duration, Instant};

/// Stand-in for a browser object URL that logs its revocation on drop.
#[derive(Debug)]
struct TrackedUrl {
    id: String,
    revoked: Rc<RefCell<Vec<String>>>,
}

impl Drop for TrackedUrl {
    fn drop(&mut self) {
        self.revoked.borrow_mut().push(self.id.clone());
    }
}

/// Minimal browser stand-in: mints URLs and records downloads.
#[derive(Default)]
struct FakeBrowser {
    minted: usize,
    revoked: Rc<RefCell<Vec<String>>>,
    downloads: Vec<String>,
}

impl FakeBrowser {
    fn url(&mut self) -> TrackedUrl {
        self.minted += 1;
        TrackedUrl {
            id: format!("blob:{}", self.minted),
            revoked: Rc::clone(&self.revoked),
        }
    }

    fn revoked(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }

    /// The same sequence the browser panel runs on submit.
    fn submit(
        &mut self,
        resizer: &mut Resizer<TrackedUrl>,
        now: Instant,
    ) -> Result<SubmitOutcome, SubmitError> {
        let request = resizer.begin_submit(now)?;
        let settings = resizer.settings().clone();
        let outcome = resize_and_encode(
            &ImageBackend::new(settings.filter),
            &request.source,
            request.target,
            &settings,
        )
        .map(|_bytes| self.url());
        let result = resizer.finish_submit(request.ticket, outcome, now);
        if let SubmitOutcome::Completed { ref filename, .. } = result {
            self.downloads.push(filename.clone());
        }
        Ok(result)
    }
}

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(w, h, |x, _| {
        if x < w / 2 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 0])
        }
    });
    let mut buf = Vec::new();
    image::ImageEncoder::write_image(
        image::codecs::png::PngEncoder::new(&mut buf),
        img.as_raw(),
        w,
        h,
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

#[test]
fn successful_resize_downloads_once() {
    let now = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let preview = browser.url();
    resizer.accept_upload("photo.png", png(200, 100), preview);
    resizer.set_width(300.0);
    resizer.set_height(150.0);

    let outcome = browser.submit(&mut resizer, now).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed { .. }));
    assert_eq!(browser.downloads, ["re-rize_xyz_300x150.png"]);
    assert!(!resizer.status().is_loading());
    assert!(resizer.source().is_none());

    // The upload preview was superseded by the artifact.
    assert_eq!(browser.revoked(), ["blob:1"]);
    let artifact = resizer.artifact().unwrap();
    assert_eq!(artifact.url().id, "blob:2");
    assert_eq!(resizer.preview().unwrap().id, "blob:2");
    assert_eq!(artifact.size(), Dimensions::new(300, 150));
}

#[test]
fn locked_ratio_drives_output_size() {
    let now = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let preview = browser.url();
    resizer.accept_upload("wide.png", png(200, 100), preview);
    resizer.toggle_lock();
    resizer.set_width(400.0);
    assert!((resizer.dimensions().height() - 200.0).abs() < f64::EPSILON);
    resizer.set_height(50.0);
    assert!((resizer.dimensions().width() - 100.0).abs() < f64::EPSILON);

    browser.submit(&mut resizer, now).unwrap();
    assert_eq!(browser.downloads, ["re-rize_xyz_100x50.png"]);
}

#[test]
fn encoded_artifact_has_requested_size() {
    let settings = ResizeSettings::default();
    let bytes = resize_and_encode(
        &ImageBackend::new(settings.filter),
        &png(200, 100),
        Dimensions::new(300, 150),
        &settings,
    )
    .unwrap();
    assert_eq!(probe_dimensions(&bytes).unwrap(), Dimensions::new(300, 150));
}

#[test]
fn validation_failures_never_download() {
    let t0 = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let err = browser.submit(&mut resizer, t0).unwrap_err();
    assert!(matches!(err, SubmitError::NoImage));
    assert_eq!(resizer.status().error(), Some("Please upload an image"));

    let preview = browser.url();
    resizer.accept_upload("photo.png", png(20, 20), preview);
    resizer.set_width(0.0);
    let err = browser.submit(&mut resizer, t0).unwrap_err();
    assert!(matches!(err, SubmitError::InvalidDimensions));
    assert_eq!(
        resizer.status().error(),
        Some("Please enter width and height")
    );

    assert!(browser.downloads.is_empty());
    assert!(!resizer.status().is_loading());
}

#[test]
fn errors_clear_after_three_seconds() {
    let t0 = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let _ = browser.submit(&mut resizer, t0);
    assert!(!resizer.expire_error(t0 + Duration::from_millis(2999)));
    assert!(resizer.status().error().is_some());
    assert!(resizer.expire_error(t0 + Duration::from_millis(3000)));
    assert_eq!(resizer.status().error(), None);
}

#[test]
fn undecodable_upload_fails_resize() {
    let now = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let preview = browser.url();
    resizer.accept_upload("notes.txt", b"plain text".to_vec(), preview);
    resizer.set_width(10.0);
    resizer.set_height(10.0);

    let outcome = browser.submit(&mut resizer, now).unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(resizer.status().error(), Some("Error resizing image"));
    assert!(resizer.artifact().is_none());
    assert!(browser.downloads.is_empty());
    assert!(!resizer.status().is_loading());
}

#[test]
fn replacing_and_deleting_revoke_previews() {
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let first = browser.url();
    resizer.accept_upload("a.png", png(4, 4), first);
    let second = browser.url();
    resizer.accept_upload("b.png", png(4, 4), second);
    assert_eq!(browser.revoked(), ["blob:1"]);
    assert_eq!(resizer.source().unwrap().name(), "b.png");

    resizer.delete_image();
    assert_eq!(browser.revoked(), ["blob:1", "blob:2"]);
}

#[test]
fn artifact_outlives_delete_and_is_revoked_on_teardown() {
    let now = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let preview = browser.url();
    resizer.accept_upload("a.png", png(8, 8), preview);
    browser.submit(&mut resizer, now).unwrap();

    // The preview shares the artifact URL, so deleting the preview
    // keeps the download link alive.
    resizer.delete_image();
    assert_eq!(browser.revoked(), ["blob:1"]);
    assert!(resizer.artifact().is_some());

    drop(resizer);
    assert_eq!(browser.revoked(), ["blob:1", "blob:2"]);
}

#[test]
fn stale_completion_is_discarded_and_revoked() {
    let now = Instant::now();
    let mut browser = FakeBrowser::default();
    let mut resizer = Resizer::default();

    let preview = browser.url();
    resizer.accept_upload("a.png", png(8, 8), preview);
    let request = resizer.begin_submit(now).unwrap();

    let replacement = browser.url();
    resizer.accept_upload("b.png", png(8, 8), replacement);

    let late = browser.url();
    let outcome = resizer.finish_submit(request.ticket, Ok(late), now);
    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(resizer.artifact().is_none());
    assert_eq!(browser.revoked(), ["blob:1", "blob:3"]);
}

#[test]
fn failure_keeps_source_for_retry() {
    let now = Instant::now();
    let mut resizer = Resizer::default();
    let mut browser = FakeBrowser::default();

    let preview = browser.url();
    resizer.accept_upload("a.png", png(8, 8), preview);
    let request = resizer.begin_submit(now).unwrap();
    resizer.finish_submit(
        request.ticket,
        Err(ResizeError::Browser("blob failed".into())),
        now,
    );
    assert!(resizer.source().is_some());

    let outcome = browser.submit(&mut resizer, now).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed { .. }));
}
