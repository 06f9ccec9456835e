/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use ppat::file_utils::FileManager;

use crate::common;

/// Test file existence checking
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "en.rule", ".meta")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.rule")));
    Ok(())
}

#[test]
fn test_dir_exists_withDirectory_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(temp_dir.path().join("nested")));
    Ok(())
}

#[test]
fn test_list_files_withMixedExtensions_shouldReturnOnlyTopLevelMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "en.rule", "")?;
    common::create_test_file(temp_dir.path(), "FR.RULE", "")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "")?;
    FileManager::write_to_file(temp_dir.path().join("sub").join("de.rule"), "")?;

    let mut names: Vec<String> = FileManager::list_files(temp_dir.path(), ".rule")?
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();

    assert_eq!(names, ["FR.RULE", "en.rule"]);
    Ok(())
}

#[test]
fn test_list_files_withMissingDirectory_shouldFail() {
    assert!(FileManager::list_files("/nonexistent/ppat/dir", "rule").is_err());
}

#[test]
fn test_write_to_file_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("nested").join("result.json");

    FileManager::write_to_file(&path, "[]")?;

    assert_eq!(FileManager::read_to_string(&path)?, "[]");
    Ok(())
}

#[test]
fn test_read_word_list_shouldSkipCommentsAndBlankLines() -> Result<()> {
    let words = FileManager::read_word_list(common::test_resource_path("words.txt"))?;
    assert_eq!(words, ["Mike", "max", "Nina", "Ink", "Fin"]);
    Ok(())
}

#[test]
fn test_read_word_list_shouldTrimSurroundingWhitespace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "names.txt", "  Anna \r\n\t\n # note\nBob\n")?;
    assert_eq!(FileManager::read_word_list(path)?, ["Anna", "Bob"]);
    Ok(())
}
