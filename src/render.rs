//! HTML fragments handed to the presentation runtime.

use crate::config::{BlockKind, KeyMapping};
use crate::constants::labels;
use crate::data::{Category, ResponseSide};
use crate::types::Html;

/// Bold label text (`<b>...</b>`).
pub fn bold(text: &str) -> Html {
    format!("<b>{text}</b>")
}

/// Display label for a category.
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Male => labels::MALE,
        Category::Female => labels::FEMALE,
        Category::Talent => labels::TALENT,
        Category::Effort => labels::EFFORT,
    }
}

/// Side label for a block, e.g. `<b>E: 남성 + 재능</b>`.
pub fn side_label(keys: &KeyMapping, kind: &BlockKind, side: ResponseSide) -> Html {
    let names: Vec<&str> = kind
        .categories(side)
        .into_iter()
        .map(category_label)
        .collect();
    bold(&format!("{}: {}", keys.display_letter(side), names.join(" + ")))
}

/// Wrap instruction paragraphs in the standard centered box.
pub fn instructions(body: &str) -> Html {
    format!(
        "<div style=\"max-width:820px;margin:40px auto;font-size:18px;line-height:1.7;\">{body}</div>"
    )
}

/// Instruction body announcing a block's side mapping.
pub fn block_instructions(heading: &str, left_label: &str, right_label: &str) -> Html {
    format!("<p><b>{heading}</b></p><p>{left_label} / {right_label}</p>")
}

/// Opening instructions.
pub fn intro(keys: &KeyMapping) -> Html {
    let left = keys.display_letter(ResponseSide::Left);
    let right = keys.display_letter(ResponseSide::Right);
    format!(
        "<p><b>분류 과제 안내</b></p>\
         <p>화면 위의 분류 규칙에 따라 가운데 제시되는 단어를 <b>빠르고 정확하게</b> 분류해 주세요.</p>\
         <p><b>{left}</b> = 왼쪽, <b>{right}</b> = 오른쪽 키입니다.</p>\
         <p>틀리면 <b>X</b>가 잠깐 나타납니다.</p>\
         <p>스페이스바를 누르면 시작합니다.</p>"
    )
}

/// Closing screen.
pub fn end_screen() -> Html {
    "<p>과제가 종료되었습니다.</p><p>스페이스바를 누르면 종료합니다.</p>".to_string()
}

/// Trial screen: side labels across the top, stimulus centered below.
pub fn trial_screen(stimulus: &str, left_label: &str, right_label: &str) -> Html {
    format!(
        "<div style=\"display:flex;justify-content:space-between;font-size:18px;margin:10px 20px;\">\
         <div>{left_label}</div><div>{right_label}</div></div>\
         <div style=\"margin-top:70px;font-size:42px;text-align:center;\">{stimulus}</div>"
    )
}

/// Red X shown after an incorrect response.
pub fn error_flash() -> Html {
    "<div style=\"font-size:56px;color:#b00020;\">X</div>".to_string()
}
