use super::*;

#[test]
fn editing_is_char_based() {
    let mut input = Input::default();
    for c in "café".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.insert_char('x');
    assert_eq!(input.buf, "cafxé");
    input.backspace();
    input.delete();
    assert_eq!(input.buf, "caf");
    assert_eq!(input.cursor, 3);
}

#[test]
fn history_skips_repeats_and_walks_back() {
    let mut input = Input::default();
    for line in ["users", "users", "  access  "] {
        input.set(line.to_string());
        input.submit();
    }
    input.history_up();
    assert_eq!(input.buf, "access");
    input.history_up();
    assert_eq!(input.buf, "users");
    input.history_up();
    assert_eq!(input.buf, "users");
    input.history_down();
    assert_eq!(input.buf, "access");
    input.history_down();
    assert!(input.buf.is_empty());
}
