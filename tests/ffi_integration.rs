#![cfg(feature = "ffi")]

use std::{
    ffi::{CStr, CString},
    os::raw::c_char,
    ptr,
    thread,
};

use merchant_core::ffi::{
    ffi_core_version, ffi_version, merchant_add_transaction, merchant_get_summary,
    merchant_last_error, merchant_manager_free, merchant_manager_open,
    merchant_process_withdrawal, merchant_string_free, merchant_transactions_json,
    FfiDashboardSummary, FfiStatus, CORE_VERSION, FFI_VERSION,
};
use tempfile::tempdir;

fn read_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null());
    let value = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
    merchant_string_free(ptr);
    value
}

#[test]
fn versions_match_crate_constants() {
    let core = unsafe { CStr::from_ptr(ffi_core_version()) };
    let ffi = unsafe { CStr::from_ptr(ffi_version()) };
    assert_eq!(core.to_str().unwrap(), CORE_VERSION);
    assert_eq!(ffi.to_str().unwrap(), FFI_VERSION);
}

#[test]
fn handle_drives_a_payment_day() {
    let dir = tempdir().unwrap();
    let path = CString::new(dir.path().to_str().unwrap()).unwrap();
    let handle = merchant_manager_open(path.as_ptr(), 0);
    assert!(!handle.is_null());

    for (name, amount) in [("John Smith", 45.99), ("Mike Chen", 89.0)] {
        let name = CString::new(name).unwrap();
        assert_eq!(
            merchant_add_transaction(handle, name.as_ptr(), amount, ptr::null_mut()),
            0
        );
    }
    assert_eq!(merchant_process_withdrawal(handle, 34.99), 0);

    let mut summary = FfiDashboardSummary::default();
    assert_eq!(merchant_get_summary(handle, &mut summary), 0);
    assert_eq!(summary.today_transactions, 2);
    assert_eq!(summary.active_customers, 2);
    assert!((summary.available_balance - 100.0).abs() < 1e-9);
    assert!((summary.weekly_revenue[6] - 134.99).abs() < 1e-9);

    let mut json = ptr::null_mut();
    assert_eq!(merchant_transactions_json(handle, &mut json), 0);
    let json = read_string(json);
    let head = json.find("Mike Chen").unwrap();
    let tail = json.find("John Smith").unwrap();
    assert!(head < tail);

    merchant_manager_free(handle);
}

#[test]
fn last_error_is_per_thread() {
    assert_eq!(
        merchant_process_withdrawal(ptr::null_mut(), 1.0),
        FfiStatus::InvalidArgument as i32
    );

    let other = thread::spawn(|| merchant_last_error().is_null())
        .join()
        .unwrap();
    assert!(other);
    assert_eq!(read_string(merchant_last_error()), "manager handle is null");
}
