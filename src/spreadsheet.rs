//! Excel工作簿读写模块
//!
//! 使用umya-spreadsheet读取和保存.xlsx文件，并让工作表实现 `RowTable`

use std::path::Path;

use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::api_constants::batch_config;
use crate::batch::RowTable;
use crate::error::Result;
use crate::translation_error;

/// 读取工作簿
pub fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    debug!("📂 读取工作簿: {}", path.display());
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| translation_error!(spreadsheet, path.display(), "读取", e))
}

/// 保存工作簿
pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    debug!("💾 保存工作簿: {}", path.display());
    umya_spreadsheet::writer::xlsx::write(book, path)
        .map_err(|e| translation_error!(spreadsheet, path.display(), "写入", e))
}

/// 获取待翻译的 `data` 工作表
pub fn data_sheet_mut<'a>(book: &'a mut Spreadsheet, path: &Path) -> Result<&'a mut Worksheet> {
    book.get_sheet_by_name_mut(batch_config::SHEET_NAME).ok_or_else(|| {
        translation_error!(
            spreadsheet,
            path.display(),
            "读取",
            format!("找不到名为 {} 的工作表", batch_config::SHEET_NAME)
        )
    })
}

impl RowTable for Worksheet {
    fn last_row(&self) -> u32 {
        self.get_highest_row()
    }

    fn row_id(&self, row: u32) -> String {
        self.get_value((batch_config::ID_COLUMN, row))
    }

    fn source_text(&self, row: u32) -> Option<String> {
        let text = self.get_value((batch_config::SOURCE_COLUMN, row));
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn write_translation(&mut self, row: u32, text: &str) {
        self.get_cell_mut((batch_config::TARGET_COLUMN, row)).set_value(text);
    }
}
