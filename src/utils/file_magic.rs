/// 校验文件头的魔术字节是否与扩展名一致
///
/// `extension` 不区分大小写，前导点号可有可无（`pdf` 与 `.pdf` 等价）。
/// 纯文本类型不检查文件头；未登记的扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    let ext = normalize_extension(extension);
    match ext.as_str() {
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        "pdf" => data.starts_with(b"%PDF"),
        // OLE 复合文档
        "doc" | "xls" | "ppt" => {
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        // OOXML 与 zip 共用 PK 头
        "docx" | "xlsx" | "pptx" | "zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        "7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        "gz" => data.starts_with(&[0x1F, 0x8B]),

        "txt" | "md" | "csv" | "json" => true,

        _ => false,
    }
}

/// 去掉前导点号并转小写
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// 从文件名中取出归一化的扩展名
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
        .filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, "jpg"));
    }

    #[test]
    fn test_pdf_and_office() {
        assert!(validate_magic_bytes(b"%PDF-1.7", "pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", "docx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], "docx"));
    }

    #[test]
    fn test_text_and_unknown() {
        assert!(validate_magic_bytes(b"# notes", "md"));
        assert!(!validate_magic_bytes(&[], "txt"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], "exe"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Lecture 1.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(normalize_extension(".Docx"), "docx");
    }
}
