//! Windows platform implementation
//!
//! Uses the official `windows` crate for type-safe Windows API bindings.

use windows::core::HSTRING;
use windows::Win32::System::Console::GetConsoleWindow;
use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;

/// True when a console window is attached to the process
pub fn console_available() -> bool {
    unsafe {
        let hwnd = GetConsoleWindow();
        !hwnd.0.is_null()
    }
}

/// Write text (already newline-terminated) to the debugger output stream
pub fn write_debug_output(text: &str) {
    let wide = HSTRING::from(text);
    unsafe {
        OutputDebugStringW(&wide);
    }
}
