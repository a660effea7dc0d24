//! System tray implementation

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY,
    NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, IDI_APPLICATION, MF_GRAYED, MF_SEPARATOR, MF_STRING, TPM_BOTTOMALIGN,
    TPM_LEFTALIGN, WM_USER,
};

/// Tray icon message
pub const WM_TRAYICON: u32 = WM_USER + 1;

/// Tray menu commands
pub const ID_TRAY_CAPTURE: u32 = 1001;
pub const ID_TRAY_OPEN: u32 = 1002;
pub const ID_TRAY_SHOW: u32 = 1003;
pub const ID_TRAY_EXIT: u32 = 1004;

/// System tray manager
pub struct SystemTray {
    hwnd: HWND,
    nid: NOTIFYICONDATAW,
    visible: bool,
}

impl SystemTray {
    pub fn new(hwnd: HWND) -> Self {
        let mut nid = NOTIFYICONDATAW::default();
        nid.cbSize = std::mem::size_of::<NOTIFYICONDATAW>() as u32;
        nid.hWnd = hwnd;
        nid.uID = 1;
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;
        copy_tip(&mut nid, "GlassPeek");

        Self {
            hwnd,
            nid,
            visible: false,
        }
    }

    /// Show the tray icon
    pub fn show(&mut self) -> windows::core::Result<()> {
        if self.visible {
            return Ok(());
        }

        unsafe {
            self.nid.hIcon = LoadIconW(None, IDI_APPLICATION)?;
            let _ = Shell_NotifyIconW(NIM_ADD, &self.nid);
            self.visible = true;
        }
        Ok(())
    }

    /// Hide the tray icon
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }

        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &self.nid);
        }
        self.visible = false;
    }

    /// Update tooltip, e.g. with the open document's name
    pub fn set_tooltip(&mut self, text: &str) {
        copy_tip(&mut self.nid, text);

        if self.visible {
            unsafe {
                let _ = Shell_NotifyIconW(NIM_MODIFY, &self.nid);
            }
        }
    }

    /// Show context menu; capture is greyed out while it cannot start
    pub fn show_context_menu(&self, can_capture: bool) -> windows::core::Result<()> {
        unsafe {
            let menu = CreatePopupMenu()?;

            let capture_flags = if can_capture { MF_STRING } else { MF_STRING | MF_GRAYED };
            let _ = AppendMenuW(menu, capture_flags, ID_TRAY_CAPTURE as usize, w!("Capture region\tCtrl+Shift+P"));
            let _ = AppendMenuW(menu, MF_STRING, ID_TRAY_OPEN as usize, w!("Open file..."));
            let _ = AppendMenuW(menu, MF_STRING, ID_TRAY_SHOW as usize, w!("Show editor"));
            let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
            let _ = AppendMenuW(menu, MF_STRING, ID_TRAY_EXIT as usize, w!("Exit"));

            let mut pt = POINT::default();
            let _ = GetCursorPos(&mut pt);

            // Required for the menu to close when clicking elsewhere
            let _ = SetForegroundWindow(self.hwnd);
            let _ = TrackPopupMenu(
                menu,
                TPM_LEFTALIGN | TPM_BOTTOMALIGN,
                pt.x,
                pt.y,
                0,
                self.hwnd,
                None,
            );

            let _ = DestroyMenu(menu);
        }
        Ok(())
    }
}

fn copy_tip(nid: &mut NOTIFYICONDATAW, text: &str) {
    let tip_wide: Vec<u16> = text.encode_utf16().collect();
    let len = tip_wide.len().min(nid.szTip.len() - 1);
    nid.szTip = [0; 128];
    nid.szTip[..len].copy_from_slice(&tip_wide[..len]);
}

impl Drop for SystemTray {
    fn drop(&mut self) {
        self.hide();
    }
}
