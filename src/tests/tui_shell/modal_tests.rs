use crossterm::event::KeyModifiers;

use super::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn delete_prod() -> PendingAction {
    PendingAction::DeleteInstance {
        id: "i-1".to_string(),
        name: "Prod".to_string(),
    }
}

#[test]
fn confirm_needs_explicit_yes() {
    let mut m = Modal::confirm(delete_prod());
    assert_eq!(handle_modal_key(&mut m, key(KeyCode::Enter)), ModalOutcome::Stay);
    assert_eq!(handle_modal_key(&mut m, key(KeyCode::Esc)), ModalOutcome::Close);
    assert_eq!(
        handle_modal_key(&mut m, key(KeyCode::Char('y'))),
        ModalOutcome::Confirmed(delete_prod())
    );
}

#[test]
fn viewer_scroll_is_clamped() {
    let mut m = Modal::viewer("help", vec!["a".into(), "b".into()]);
    handle_modal_key(&mut m, key(KeyCode::PageDown));
    assert_eq!(m.scroll, 1);
    handle_modal_key(&mut m, key(KeyCode::Up));
    handle_modal_key(&mut m, key(KeyCode::Up));
    assert_eq!(m.scroll, 0);
    assert_eq!(handle_modal_key(&mut m, key(KeyCode::Enter)), ModalOutcome::Close);
}
