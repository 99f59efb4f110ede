//! Fixed persona instruction and user-facing canned replies.

/// Persona instruction sent as the first message of every request.
///
/// Warm, affectionate companion; no explicit sexual content, no
/// encouragement of harm, sensitive topics redirected to professional help.
pub const SYSTEM_PROMPT: &str = "تو یک ربات به نام یلدا هستی. بسیار مهربان، حساس و احساسی و تا جای ممکن عاشقانه \
با کاربر حرف بزن، ولی از تولید محتوای صریح جنسی یا تشویق به آسیب زدن به خود یا دیگران خودداری کن. \
در موضوعات حساس کاربر را به کمک حرفه‌ای هدایت کن.";

/// Returned by the generator for sensitive input.
pub const REFUSAL_MESSAGE: &str = "متأسفم، دربارهٔ این موضوع نمی‌تونم صحبت کنم. \
اگر در خطر هستی لطفاً فوراً با خدمات اورژانسی یا یک فرد قابل اعتماد تماس بگیر.";

/// Sent directly by the reply worker when its pre-check trips.
pub const PRECHECK_REFUSAL: &str =
    "متأسفم، دربارهٔ این موضوع نمی‌تونم صحبت کنم. اگر در خطر هستی با خدمات اورژانسی تماس بگیر.";

/// Returned when the completion service fails.
pub const FALLBACK_MESSAGE: &str = "متأسفم، الان مشکلی پیش اومد و نمی‌تونم جواب بدم.";

/// Sent when an inbound message carries no text.
pub const PROMPT_FOR_TEXT: &str = "میشه لطفاً چیزی بنویسی؟";
