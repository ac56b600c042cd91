//! Tests for loading rig files
//!
//! Most tests go through `process_skl` with an in-memory reader. The file
//! based ones write to a temporary directory.

use nalgebra_glm as glm;
use skelrig::{
    rb_error::RbError,
    skeleton::{self, Lookup, Skeleton},
    skl_import::{self, convert, SklToLoad},
};
use std::{io::Write, sync::Once};

const EPSILON: f32 = 0.0001f32;
static INIT: Once = Once::new();

const TWO_BONES: &str = "version 1
nodes
0 root -1
1 child 0
end
skeleton
0 0 0 0 0 0 0
1 1 2 3 0 0 0
end
";

/// Initializes logging in a "once per test run" manner
fn init_tests() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

fn compare(m1: &glm::Mat4, m2: &glm::Mat4) {
    let c = glm::equal_columns_eps(m1, m2, EPSILON);
    assert!(c.x && c.y && c.z && c.w, "{m1:?} != {m2:?}");
}

fn lenient(text: &str) -> Result<Skeleton, RbError> {
    init_tests();
    skl_import::process_skl(&SklToLoad::default(), text.as_bytes())
}

fn strict(text: &str) -> Result<Skeleton, RbError> {
    init_tests();
    let options = SklToLoad {
        strict: true,
        ..Default::default()
    };
    skl_import::process_skl(&options, text.as_bytes())
}

#[test]
fn two_bones() {
    let s = lenient(TWO_BONES).unwrap();
    assert_eq!(s.len(), 2);

    let child = s.bone(1).unwrap();
    assert_eq!(child.parent(), Some(0));
    assert_eq!(child.position, glm::vec3(1.0, 3.0, 2.0));
    compare(&child.rotation, &glm::Mat4::identity());

    let expected = s.transforms()[0]
        * glm::translation(&glm::vec3(1.0, 3.0, 2.0))
        * glm::Mat4::identity();
    compare(&s.transforms()[1], &expected);
    compare(&s.transforms()[0], &glm::Mat4::identity());
}

#[test]
fn inverses_generated() {
    let text = "version 1
nodes
0 hips -1
1 spine 0
2 head 1
end
skeleton
0 0.0 1.0 0.0 0.0 0.0 0.0
1 0.0 0.5 0.1 0.2 0.0 -0.4
2 0.0 0.4 0.0 1.0 0.3 0.2
end
";
    let s = lenient(text).unwrap();
    assert_eq!(s.len(), 3);
    for (m, inv) in s.transforms().iter().zip(s.inv_transforms()) {
        compare(&(m * inv), &glm::Mat4::identity());
    }
    // Converted pose goes through to the world transform
    let head_local = glm::translation(&convert::swap_position([0.0, 0.4, 0.0]))
        * convert::convert_rotation([1.0, 0.3, 0.2]);
    compare(&s.transforms()[2], &(s.transforms()[1] * head_local));
}

#[test]
fn unsupported_version() {
    let text = TWO_BONES.replace("version 1", "version 2");
    assert!(matches!(
        lenient(&text),
        Err(RbError::UnsupportedVersion(2))
    ));
    assert!(matches!(
        lenient("version 0\n"),
        Err(RbError::UnsupportedVersion(0))
    ));
}

#[test]
fn version_checked_before_bones() {
    // The error comes before any bone is added even if nodes follow
    let text = "version 3\nnodes\n0 root -1\nend\n";
    assert!(matches!(lenient(text), Err(RbError::UnsupportedVersion(3))));
}

#[test]
fn missing_version() {
    let text = TWO_BONES.replace("version 1\n", "");
    assert_eq!(lenient(&text).unwrap().len(), 2);
    assert!(matches!(strict(&text), Err(RbError::MissingVersion)));
    assert!(matches!(strict(""), Err(RbError::MissingVersion)));
    assert!(lenient("").unwrap().is_empty());
}

#[test]
fn duplicate_version() {
    let text = format!("version 1\n{TWO_BONES}");
    assert_eq!(lenient(&text).unwrap().len(), 2);
    assert!(matches!(strict(&text), Err(RbError::DuplicateVersion)));
}

#[test]
fn unknown_pose_bone() {
    let text = TWO_BONES.replace("1 1 2 3 0 0 0", "7 1 2 3 0 0 0");
    let s = lenient(&text).unwrap();
    assert_eq!(s.len(), 2);
    // Left at the identity pose
    assert_eq!(s.bone(1).unwrap().position, glm::Vec3::zeros());
    assert!(matches!(strict(&text), Err(RbError::UnknownBoneId(7))));
}

#[test]
fn pose_for_reserved_id() {
    let text = TWO_BONES.replace("1 1 2 3 0 0 0", "-1 1 2 3 0 0 0");
    let s = lenient(&text).unwrap();
    assert_eq!(s.bone(1).unwrap().position, glm::Vec3::zeros());
    assert!(matches!(strict(&text), Err(RbError::UnknownBoneId(-1))));
}

#[test]
fn reserved_bone_id() {
    let text = TWO_BONES.replace("1 child 0", "-1 child 0");
    assert!(matches!(lenient(&text), Err(RbError::ReservedBoneId)));
}

#[test]
fn duplicate_bone_id() {
    let text = TWO_BONES.replace("1 child 0", "0 child 0");
    assert!(matches!(lenient(&text), Err(RbError::DuplicateBoneId(0))));
}

#[test]
fn unknown_parent_is_root() {
    let text = TWO_BONES.replace("1 child 0", "1 child 5");
    let s = lenient(&text).unwrap();
    assert_eq!(s.bone(1).unwrap().parent(), None);
}

#[test]
fn junk_lines_skipped() {
    let text = "// exported rig
version 1
nodes
0 root -1
this line is not a bone
1 child 0 extra
2 \"left arm\" 0
end
skeleton
0 0 0 0 0 0
0 a b c d e f
1 1 2 3 0 0 0
end
";
    let s = lenient(text).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.bone(0).unwrap().position, glm::Vec3::zeros());
    // Pose for the unknown id 1 was skipped rather than failing
}

#[test]
fn sections_in_any_order() {
    // A pose section before the nodes section finds no bones
    let text = "version 1
skeleton
0 1 2 3 0 0 0
end
nodes
0 root -1
end
";
    let s = lenient(text).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.bone(0).unwrap().position, glm::Vec3::zeros());
    assert!(matches!(strict(text), Err(RbError::UnknownBoneId(0))));
}

#[test]
fn deep_hierarchy() {
    let mut text = String::from("version 1\nnodes\n");
    for id in 0..40 {
        text.push_str(&format!("{id} bone_{id} {}\n", id - 1));
    }
    text.push_str("end\nskeleton\n");
    for id in 0..40 {
        text.push_str(&format!("{id} 0 1 0 0.05 0.1 0\n"));
    }
    text.push_str("end\n");

    let s = lenient(&text).unwrap();
    assert_eq!(s.len(), 40);
    assert_eq!(s.lookup(39), Lookup::Found(39));
    for index in 0..s.len() {
        compare(
            &s.transforms()[index],
            &skeleton::bone_transform(&s, index).unwrap(),
        );
        compare(
            &(s.transforms()[index] * s.inv_transforms()[index]),
            &glm::Mat4::identity(),
        );
    }
}

#[test]
fn load_file() {
    init_tests();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rig.skl");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(TWO_BONES.as_bytes()).unwrap();
    drop(f);

    let options = SklToLoad::new(path.to_str().unwrap());
    let s = skl_import::load(&options).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.bone(1).unwrap().name, "child");
}

#[test]
fn load_missing_file() {
    init_tests();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.skl");
    let options = SklToLoad::new(path.to_str().unwrap());
    assert!(matches!(
        skl_import::load(&options),
        Err(RbError::StdIoError(_))
    ));
}

#[test]
fn options_from_yaml() {
    let options = SklToLoad::from_yaml("filename: rigs/hero.skl\nstrict: true\n")
        .unwrap();
    assert_eq!(
        options,
        SklToLoad {
            filename: "rigs/hero.skl".to_string(),
            strict: true,
        }
    );
    let options = SklToLoad::from_yaml("filename: a.skl\n").unwrap();
    assert!(!options.strict);
    assert!(matches!(
        SklToLoad::from_yaml("strict: [1, 2"),
        Err(RbError::SerdeYamlError(_))
    ));
}

#[test]
fn loosely_written_versions() {
    // The leading integer of the version is what counts
    let lines = [("version 2.0", 2), ("version 2a", 2), ("version2", 2)];
    for (line, version) in lines {
        let text = format!("{line}\nnodes\n0 root -1\nend\n");
        match lenient(&text) {
            Err(RbError::UnsupportedVersion(v)) => assert_eq!(v, version),
            other => panic!("{line}: {other:?}"),
        }
    }
    let text = "version 1.0\nnodes\n0 root -1\nend\n";
    assert_eq!(lenient(text).unwrap().len(), 1);
}

#[test]
fn unreadable_version() {
    for line in ["version 99999999999", "version x", "version"] {
        let text = format!("{line}\nnodes\n0 root -1\nend\n");
        match lenient(&text) {
            Err(RbError::UnreadableVersion(l)) => assert_eq!(l, line),
            other => panic!("{line}: {other:?}"),
        }
    }
}

#[test]
fn non_utf8_bytes() {
    init_tests();
    let text = b"version 1\n# exported by caf\xe9\nnodes\n0 root -1\n1 b\xffne 0\nend\n";
    let s = skl_import::process_skl(&SklToLoad::default(), &text[..]).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.bone(1).unwrap().name, "b\u{fffd}ne");
}
