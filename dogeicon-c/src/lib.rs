#![no_std]

use dogeicon::{
    consts::{ICON_LEN, RASTER_LEN},
    EncodeOptions, IconEncodeContext,
};

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    unsafe { core::hint::unreachable_unchecked() }
}

/// Size of an encoded icon, in bytes.
#[no_mangle]
pub static DOGEICON_ICON_LEN: usize = ICON_LEN;

/// Size of a decoded 48x48 RGB image, in bytes.
#[no_mangle]
pub static DOGEICON_RASTER_LEN: usize = RASTER_LEN;

/// Encodes a 48x48 image into a DogeIcon.
///
/// - `input`: Pointer to the input pixels, row-major
/// - `input_len`: Length of the input buffer, in bytes (48 * 48 * `components`)
/// - `components`: Bytes per pixel, 3 (RGB) or 4 (RGBx, the 4th byte is ignored)
/// - `flags`: Encoder option word. Bit 2 forces the style in bit 0; bits 3-4 select the chroma
///   policy (0 top-left, 8 average, 16 top average, 24 intensity weighted)
/// - `icon_out`: Pointer to the output buffer for the encoded icon
/// - `icon_out_len`: Length of `icon_out`, at least `DOGEICON_ICON_LEN`
/// - `preview_out`: Pointer to a buffer receiving the decoded RGB preview, or null
/// - `preview_out_len`: Length of `preview_out`, at least `DOGEICON_RASTER_LEN` if not null
///
/// Returns the selected style (0 = flat, 1 = linear), or -1 if the input or output buffers have
/// the wrong size.
///
/// # Safety
///
/// All non-null pointers must be valid for their given lengths.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn dogeicon_compress(
    input: *const u8,
    input_len: usize,
    components: usize,
    flags: u8,
    icon_out: *mut u8,
    icon_out_len: usize,
    preview_out: *mut u8,
    preview_out_len: usize,
) -> isize {
    if input.is_null() || icon_out.is_null() || icon_out_len < ICON_LEN {
        return -1;
    }
    if !preview_out.is_null() && preview_out_len < RASTER_LEN {
        return -1;
    }

    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let mut icon = [0; ICON_LEN];
    let mut preview = [0; RASTER_LEN];

    let ctx = IconEncodeContext::new(EncodeOptions::from_flags(flags));
    let Ok(style) = ctx.compress(input, components, &mut icon, &mut preview) else {
        return -1;
    };

    unsafe { core::slice::from_raw_parts_mut(icon_out, ICON_LEN) }.copy_from_slice(&icon);
    if !preview_out.is_null() {
        unsafe { core::slice::from_raw_parts_mut(preview_out, RASTER_LEN) }
            .copy_from_slice(&preview);
    }

    style.to_byte() as isize
}

/// Decodes a DogeIcon into a 48x48 RGB image.
///
/// - `icon`: Pointer to the encoded icon
/// - `icon_len`: Length of the icon buffer, at least `DOGEICON_ICON_LEN`
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, at least `DOGEICON_RASTER_LEN`
///
/// Returns the number of pixels written to the output buffer, or -1 otherwise.
///
/// # Safety
///
/// Both pointers must be valid for their given lengths.
#[no_mangle]
pub unsafe extern "C" fn dogeicon_decompress(
    icon: *const u8,
    icon_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    if icon.is_null() || output.is_null() || output_len < RASTER_LEN {
        return -1;
    }

    let icon = unsafe { core::slice::from_raw_parts(icon, icon_len) };
    let output = unsafe { &mut *output.cast::<[u8; RASTER_LEN]>() };

    match dogeicon::decompress(icon, output) {
        Ok(_) => (RASTER_LEN / 3) as isize,
        Err(_) => -1,
    }
}
