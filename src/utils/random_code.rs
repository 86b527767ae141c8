use rand::Rng;

/// 生成学号：`<前缀><入学年份><6 位随机数>`
pub fn generate_student_number(prefix: &str, year: i32) -> String {
    let mut rng = rand::rng();
    let serial: u32 = rng.random_range(0..1_000_000);
    format!("{prefix}{year}{serial:06}")
}

/// 生成文件下载令牌
pub fn generate_download_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_number_format() {
        let number = generate_student_number("S", 2026);
        assert_eq!(number.len(), 1 + 4 + 6);
        assert!(number.starts_with("S2026"));
        assert!(number[5..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_download_token_is_hex() {
        let token = generate_download_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
