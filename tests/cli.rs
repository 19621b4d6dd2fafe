// End-to-end tests driving the spv2h binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run spv2h inside `dir` so no stray spv2h.toml is picked up
fn spv2h(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spv2h"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to launch spv2h")
}

fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn three_bytes_become_one_padded_word() {
    let dir = scratch();
    std::fs::write(dir.path().join("tiny.spv"), [0x01u8, 0x02, 0x03]).unwrap();

    let output = spv2h(dir.path(), &["tiny.spv", "include/tiny.h"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = std::fs::read_to_string(dir.path().join("include/tiny.h")).unwrap();
    let expected = "\
/* Generated by spv2h from tiny.spv. Do not edit by hand. */

#ifndef TINY_H_
#define TINY_H_

#include <stddef.h>
#include <stdint.h>

#ifdef __cplusplus
extern \"C\" {
#endif

static const uint32_t tiny_spv[] = {
    0x00030201u
};

static const size_t tiny_spv_size = sizeof(tiny_spv);

#ifdef __cplusplus
}
#endif

#endif /* TINY_H_ */
";
    assert_eq!(text, expected);
}

#[test]
fn explicit_prefix_is_used_verbatim() {
    let dir = scratch();
    std::fs::write(dir.path().join("bc7.spv"), [0u8; 8]).unwrap();

    let output = spv2h(dir.path(), &["bc7.spv", "bc7_shader.h", "bc7_shader_spv"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = std::fs::read_to_string(dir.path().join("bc7_shader.h")).unwrap();
    assert!(text.contains("static const uint32_t bc7_shader_spv[] = {\n    0x00000000u, 0x00000000u\n};"));
    assert!(text.contains("static const size_t bc7_shader_spv_size = sizeof(bc7_shader_spv);"));
    assert!(text.contains("#ifndef BC7_SHADER_H_"));
}

#[test]
fn reruns_are_byte_identical() {
    let dir = scratch();
    let payload: Vec<u8> = (0..1001u32).map(|i| (i * 7 % 256) as u8).collect();
    std::fs::write(dir.path().join("big.spv"), &payload).unwrap();

    assert!(spv2h(dir.path(), &["big.spv", "big.h"]).status.success());
    let first = std::fs::read(dir.path().join("big.h")).unwrap();
    assert!(spv2h(dir.path(), &["big.spv", "big.h"]).status.success());
    let second = std::fs::read(dir.path().join("big.h")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn wrong_argument_count_exits_2() {
    let dir = scratch();
    for args in [&[][..], &["only.spv"][..], &["a.spv", "a.h", "a", "extra"][..]] {
        let output = spv2h(dir.path(), args);
        assert_eq!(output.status.code(), Some(2), "args {args:?}");
        assert!(stderr(&output).contains("Usage"), "{}", stderr(&output));
    }
}

#[test]
fn invalid_prefix_exits_2() {
    let dir = scratch();
    std::fs::write(dir.path().join("a.spv"), [0u8; 4]).unwrap();

    let output = spv2h(dir.path(), &["a.spv", "a.h", "not-an-identifier"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("a.h").exists());
}

#[test]
fn missing_input_exits_3_without_touching_output() {
    let dir = scratch();

    let output = spv2h(dir.path(), &["missing.spv", "gen/missing.h"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("missing.spv"));
    assert!(!dir.path().join("gen").exists());
}

#[test]
fn empty_input_exits_4_by_default() {
    let dir = scratch();
    std::fs::write(dir.path().join("empty.spv"), b"").unwrap();

    let output = spv2h(dir.path(), &["empty.spv", "empty.h"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("empty"));
    assert!(!dir.path().join("empty.h").exists());
}

#[test]
fn empty_input_allowed_by_config() {
    let dir = scratch();
    std::fs::write(dir.path().join("empty.spv"), b"").unwrap();
    std::fs::write(dir.path().join("spv2h.toml"), "[emit]\nallow_empty = true\n").unwrap();

    let output = spv2h(dir.path(), &["empty.spv", "empty.h"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = std::fs::read_to_string(dir.path().join("empty.h")).unwrap();
    assert!(text.contains("static const size_t empty_spv_size = 0;"));
}

#[test]
fn unwritable_output_exits_5() {
    let dir = scratch();
    std::fs::write(dir.path().join("a.spv"), [0u8; 4]).unwrap();
    std::fs::write(dir.path().join("blocker"), b"").unwrap();

    let output = spv2h(dir.path(), &["a.spv", "blocker/a.h"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn config_selects_byte_mode_and_extern_linkage() {
    let dir = scratch();
    std::fs::write(dir.path().join("s.spv"), [0xffu8, 0x01]).unwrap();
    std::fs::write(
        dir.path().join("policy.toml"),
        "[emit]\nencoding = \"bytes\"\nlinkage = \"extern\"\nsize_suffix = \"_len\"\n",
    )
    .unwrap();

    let output = spv2h(dir.path(), &["--config", "policy.toml", "s.spv", "s.h"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = std::fs::read_to_string(dir.path().join("s.h")).unwrap();
    assert!(text.contains("extern const uint8_t s_spv[];\nextern const size_t s_spv_len;\n"));
    assert!(text.contains("const uint8_t s_spv[] = {\n    0xffu, 0x01u, 0x00u, 0x00u\n};"));
    assert!(text.contains("const size_t s_spv_len = sizeof(s_spv);"));
    assert!(!text.contains("static"));
}

#[test]
fn bad_config_exits_1() {
    let dir = scratch();
    std::fs::write(dir.path().join("a.spv"), [0u8; 4]).unwrap();

    let output = spv2h(dir.path(), &["--config", "nope.toml", "a.spv", "a.h"]);
    assert_eq!(output.status.code(), Some(1));

    std::fs::write(dir.path().join("spv2h.toml"), "[emit]\nencoding = 3\n").unwrap();
    let output = spv2h(dir.path(), &["a.spv", "a.h"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("a.h").exists());
}

#[test]
fn unaligned_input_logs_padding_warning() {
    let dir = scratch();
    std::fs::write(dir.path().join("odd.spv"), [1u8, 2, 3, 4, 5]).unwrap();

    let output = spv2h(dir.path(), &["odd.spv", "odd.h"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("padding with 3 zero byte(s)"));
}
