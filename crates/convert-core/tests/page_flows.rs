//! End-to-end flows through page controllers, driven the way the browser
//! binding drives them.

use convert_core::{
    Completion, ConvertError, EntryId, FileMeta, PageController, PageKind, Phase, SelectedFile,
    SiteConfig, ToolKind,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

type Page = PageController<Vec<u8>>;

fn page(kind: PageKind, hash: &str) -> Page {
    PageController::new(kind, hash, &SiteConfig::default())
}

fn pdf(name: &str) -> SelectedFile<Vec<u8>> {
    SelectedFile::new(
        FileMeta::new(name, "application/pdf", 4096),
        b"%PDF-1.4".to_vec(),
    )
}

fn image(name: &str) -> SelectedFile<Vec<u8>> {
    SelectedFile::new(FileMeta::new(name, "image/jpeg", 2048), vec![0xFF, 0xD8])
}

fn docx(name: &str) -> SelectedFile<Vec<u8>> {
    SelectedFile::new(
        FileMeta::new(
            name,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            512,
        ),
        b"PK".to_vec(),
    )
}

fn submitted_names(p: &mut Page) -> (convert_core::Generation, Vec<String>) {
    let ticket = p
        .active_mut()
        .submit()
        .expect("valid options")
        .expect("submission starts");
    let names = ticket
        .request
        .files()
        .map(|f| f.meta.name.clone())
        .collect();
    (ticket.generation, names)
}

#[test]
fn merge_submits_files_in_gallery_order() {
    let mut p = page(PageKind::MergePdf, "");
    let ids = p
        .active_mut()
        .accept_files(vec![pdf("one.pdf"), pdf("two.pdf"), pdf("three.pdf")])
        .unwrap();

    // drag "three" onto "one": moving left lands before the target
    let tool = p.active_mut();
    tool.begin_drag(ids[2]).unwrap();
    assert!(tool.drag_over(ids[0]));
    tool.finish_drag();

    let (_, names) = submitted_names(&mut p);
    assert_eq!(names, vec!["three.pdf", "one.pdf", "two.pdf"]);
}

#[test]
fn submit_with_zero_files_sends_nothing() {
    for kind in PageKind::ALL {
        let mut p = page(kind, "");
        let before = p.view();
        assert!(p.active_mut().submit().unwrap().is_none(), "{:?}", kind);
        assert_eq!(p.view(), before);
    }
}

#[test]
fn success_response_shows_download_link() {
    let mut p = page(PageKind::CompressPdf, "");
    p.active_mut().accept_files(vec![pdf("big.pdf")]).unwrap();
    p.active_mut().set_option("level", "high").unwrap();

    let ticket = p.active_mut().submit().unwrap().unwrap();
    assert_eq!(ticket.request.text_fields(), vec![("level", "high")]);
    let generation = ticket.generation;

    let completion = p.active_mut().complete(
        generation,
        Ok(r#"{"success":true,"download_url":"/files/out.pdf"}"#.to_string()),
    );
    assert_eq!(
        completion,
        Completion::Succeeded {
            download_url: "/files/out.pdf".to_string()
        }
    );

    let view = p.view();
    assert!(view.result_visible);
    assert_eq!(view.download_url.as_deref(), Some("/files/out.pdf"));
    assert!(!view.tools[0].converter_visible);
}

#[test]
fn failure_response_restores_form() {
    let mut p = page(PageKind::ImageTools, "#resize");
    p.active_mut().accept_files(vec![image("cat.jpg")]).unwrap();
    let label_before = p.active().submit_label().to_string();

    let (generation, _) = submitted_names(&mut p);
    assert_eq!(p.active().submit_label(), "Processing...");

    let completion = p.active_mut().complete(
        generation,
        Ok(r#"{"success":false,"error":"corrupt file"}"#.to_string()),
    );
    match completion {
        Completion::Failed { alert } => assert!(alert.contains("corrupt file")),
        other => panic!("expected failure, got {:?}", other),
    }

    let view = p.view();
    assert!(!view.result_visible);
    assert_eq!(p.active().submit_label(), label_before);
    assert_eq!(p.active().phase(), Phase::Ready);
}

#[test]
fn start_over_restores_initial_state_everywhere() {
    for kind in PageKind::ALL {
        for &mode in kind.modes() {
            let mut p = page(kind, mode.id());
            let initial = p.view();

            let file = match mode {
                ToolKind::CompressImage | ToolKind::ResizeImage | ToolKind::ImageToPdf => {
                    image("a.jpg")
                }
                ToolKind::WordToPdf => docx("a.docx"),
                _ => pdf("a.pdf"),
            };
            p.active_mut().accept_files(vec![file]).unwrap();
            if mode == ToolKind::ResizeImage {
                p.active_mut().set_option("width", "640").unwrap();
            }

            let (generation, _) = submitted_names(&mut p);
            p.active_mut().complete(
                generation,
                Ok(r#"{"success":true,"download_url":"/x"}"#.to_string()),
            );
            assert!(p.view().result_visible);

            p.start_over();
            assert_eq!(p.view(), initial, "{:?}/{:?}", kind, mode);
        }
    }
}

#[test]
fn switching_modes_never_leaks_selection() {
    let mut p = page(PageKind::WordPdf, "#word2pdf");
    p.active_mut().accept_files(vec![docx("letter.docx")]).unwrap();

    p.switch_mode("pdf2word").unwrap();
    assert!(p.active_mut().submit().unwrap().is_none());

    p.active_mut().accept_files(vec![pdf("scan.pdf")]).unwrap();
    let (_, names) = submitted_names(&mut p);
    assert_eq!(names, vec!["scan.pdf"]);

    p.switch_mode("word2pdf").unwrap();
    assert_eq!(p.active().file_count(), 0);
}

#[test]
fn response_after_mode_switch_is_ignored() {
    let mut p = page(PageKind::PdfJpg, "");
    p.active_mut().accept_files(vec![pdf("a.pdf")]).unwrap();
    let (generation, _) = submitted_names(&mut p);

    p.switch_mode("jpg2pdf").unwrap();
    let stale = p
        .tool_mut(ToolKind::PdfToJpg)
        .unwrap()
        .complete(generation, Ok(r#"{"success":true,"download_url":"/late"}"#.into()));
    assert_eq!(stale, Completion::Stale);
    assert!(!p.view().result_visible);
}

#[test]
fn rejected_single_file_drop_keeps_state() {
    let mut p = page(PageKind::PdfJpg, "");
    p.active_mut().accept_files(vec![pdf("keep.pdf")]).unwrap();
    let before = p.view();

    let err = p.active_mut().accept_files(vec![image("x.jpg")]).unwrap_err();
    assert_eq!(err, ConvertError::Rejected("Please upload a PDF file.".into()));
    assert_eq!(p.view(), before);
}

#[derive(Debug, Clone)]
enum Action {
    Drop(usize),
    Remove(usize),
    Drag(usize, usize),
    RemoveAll,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (1usize..4).prop_map(Action::Drop),
        (0usize..16).prop_map(Action::Remove),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Action::Drag(a, b)),
        Just(Action::RemoveAll),
    ]
}

proptest! {
    /// Property: the count label always equals the number of held files, and
    /// the submitted order always equals the rendered order.
    #[test]
    fn count_and_order_track_the_gallery(actions in prop::collection::vec(action(), 1..30)) {
        let mut p = page(PageKind::ImageToPdf, "");
        let mut dropped = 0usize;

        for action in actions {
            let tool = p.active_mut();
            match action {
                Action::Drop(n) => {
                    let files = (0..n)
                        .map(|i| image(&format!("img{}-{}.jpg", dropped, i)))
                        .collect();
                    dropped += 1;
                    tool.accept_files(files).unwrap();
                }
                Action::Remove(i) => {
                    let ids = tool.gallery().ids();
                    if !ids.is_empty() {
                        tool.remove(ids[i % ids.len()]).unwrap();
                    }
                }
                Action::Drag(a, b) => {
                    let ids: Vec<EntryId> = tool.gallery().ids();
                    if !ids.is_empty() {
                        tool.begin_drag(ids[a % ids.len()]).unwrap();
                        tool.drag_over(ids[b % ids.len()]);
                        tool.finish_drag();
                    }
                }
                Action::RemoveAll => tool.remove_all(),
            }

            let view = p.view();
            let tool_view = &view.tools[0];
            prop_assert_eq!(tool_view.count, p.active().file_count());
            prop_assert_eq!(tool_view.entries.len(), tool_view.count);
            prop_assert_eq!(tool_view.gallery_visible, tool_view.count > 0);
            prop_assert_eq!(tool_view.submit_enabled, tool_view.count > 0);
        }

        let rendered: Vec<String> = p.view().tools[0]
            .entries
            .iter()
            .map(|e| e.name.clone())
            .collect();
        if rendered.is_empty() {
            prop_assert!(p.active_mut().submit().unwrap().is_none());
        } else {
            let (_, submitted) = submitted_names(&mut p);
            prop_assert_eq!(submitted, rendered);
        }
    }
}
