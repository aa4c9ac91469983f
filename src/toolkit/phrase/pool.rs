

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::models::{PoolKind, PoolOrigin, WordPool};


pub const DEFAULT_ADJECTIVES: &[&str] = &[
    "아름다운", "따뜻한", "밝은", "새로운", "창의적인", "독창적인", "혁신적인",
    "차가운", "깊은", "높은", "부드러운", "강한", "빠른", "느린", "큰", "작은",
    "똑똑한", "현명한", "용감한", "친절한", "성실한", "부지런한", "정직한",
    "열정적인", "적극적인", "능동적인", "자발적인", "협력적인", "포용적인",
    "논리적인", "체계적인", "분석적인", "비판적인", "객관적인", "합리적인",
];


pub const DEFAULT_NOUNS: &[&str] = &[
    "바람", "별", "꿈", "빛", "마음", "생각", "미래", "희망", "에너지", "열정",
    "바다", "하늘", "구름", "꽃", "나무", "물", "불", "길", "집", "문",
    "리더", "개발자", "설계자", "분석가", "기획자", "관리자", "전문가",
    "혁신가", "창작자", "탐험가", "도전자", "실행자", "완주자", "달성자",
    "사고자", "관찰자", "판단자", "의사결정자", "문제해결사", "커뮤니케이터",
];


pub fn default_words(kind: PoolKind) -> Vec<String> {
    let words = match kind {
        PoolKind::Adjectives => DEFAULT_ADJECTIVES,
        PoolKind::Nouns => DEFAULT_NOUNS,
    };
    words.iter().map(|w| w.to_string()).collect()
}

/// Source of the adjective and noun pools.
///
/// Called once per pipeline invocation; caching, if any, belongs to the implementor.
pub trait WordPoolSource: Send + Sync {
    fn load(&self, kind: PoolKind) -> WordPool;
}

/// One word per line; blank lines and `#` comments are skipped.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Reads `adjectives.txt` / `nouns.txt` from the first directory that has a
/// non-empty file, falling back to the built-in lists.
pub struct FileWordPool {
    search_dirs: Vec<PathBuf>,
}

impl FileWordPool {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    fn read_file(path: &Path) -> Option<Vec<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(parse_word_list(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read word pool {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl WordPoolSource for FileWordPool {
    fn load(&self, kind: PoolKind) -> WordPool {
        for dir in &self.search_dirs {
            let path = dir.join(kind.file_name());
            match Self::read_file(&path) {
                Some(words) if !words.is_empty() => {
                    info!("Word pool loaded ({}): {} words", path.display(), words.len());
                    return WordPool {
                        kind,
                        words,
                        origin: PoolOrigin::File(path),
                    };
                }
                Some(_) => debug!("Word pool {} is empty, skipping", path.display()),
                None => {}
            }
        }

        warn!(
            "No {} file found in {:?}, using built-in default list",
            kind.file_name(),
            self.search_dirs
        );
        WordPool {
            kind,
            words: default_words(kind),
            origin: PoolOrigin::BuiltIn,
        }
    }
}


pub struct StaticWordPool {
    adjectives: Vec<String>,
    nouns: Vec<String>,
}

impl StaticWordPool {
    pub fn new<A, N>(adjectives: A, nouns: N) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            adjectives: adjectives.into_iter().map(Into::into).collect(),
            nouns: nouns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_ADJECTIVES.iter().copied(), DEFAULT_NOUNS.iter().copied())
    }
}

impl WordPoolSource for StaticWordPool {
    fn load(&self, kind: PoolKind) -> WordPool {
        let words = match kind {
            PoolKind::Adjectives => self.adjectives.clone(),
            PoolKind::Nouns => self.nouns.clone(),
        };
        WordPool {
            kind,
            words,
            origin: PoolOrigin::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chingho-pool-{}-{}", name, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_word_list_skips_comments_and_blanks() {
        let content = "# 형용사 목록\n밝은\n\n  차가운  \n#주석\n깊은\n";
        assert_eq!(parse_word_list(content), vec!["밝은", "차가운", "깊은"]);
    }

    #[test]
    fn test_file_pool_reads_first_matching_dir() {
        let empty = temp_dir("empty");
        let data = temp_dir("data");
        std::fs::write(data.join("nouns.txt"), "빛\n바람\n").unwrap();

        let pool = FileWordPool::new(vec![empty.clone(), data.clone()]).load(PoolKind::Nouns);
        assert_eq!(pool.words, vec!["빛", "바람"]);
        assert_eq!(pool.origin, PoolOrigin::File(data.join("nouns.txt")));

        std::fs::remove_dir_all(&empty).ok();
        std::fs::remove_dir_all(&data).ok();
    }

    #[test]
    fn test_file_pool_skips_comment_only_file() {
        let commented = temp_dir("commented");
        std::fs::write(commented.join("adjectives.txt"), "# nothing here\n\n").unwrap();

        let pool = FileWordPool::new(vec![commented.clone()]).load(PoolKind::Adjectives);
        assert_eq!(pool.origin, PoolOrigin::BuiltIn);

        std::fs::remove_dir_all(&commented).ok();
    }

    #[test]
    fn test_file_pool_falls_back_to_builtin() {
        let pool = FileWordPool::new(vec![PathBuf::from("/nonexistent/chingho")]).load(PoolKind::Adjectives);
        assert_eq!(pool.origin, PoolOrigin::BuiltIn);
        assert_eq!(pool.words.len(), DEFAULT_ADJECTIVES.len());
        assert!(!pool.words.is_empty());
    }

    #[test]
    fn test_builtin_pools_have_no_duplicates() {
        for words in [DEFAULT_ADJECTIVES, DEFAULT_NOUNS] {
            let unique: std::collections::HashSet<_> = words.iter().collect();
            assert_eq!(unique.len(), words.len());
        }
    }

    #[test]
    fn test_static_pool() {
        let source = StaticWordPool::new(["밝은"], ["빛", "바람"]);
        let nouns = source.load(PoolKind::Nouns);
        assert_eq!(nouns.words, vec!["빛", "바람"]);
        assert_eq!(nouns.origin, PoolOrigin::Memory);
        assert_eq!(source.load(PoolKind::Adjectives).kind, PoolKind::Adjectives);
    }
}
