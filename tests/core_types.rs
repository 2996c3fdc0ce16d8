use logconv::{GrayImage, ImageView, Kernel, LogConvError, OutputBuffer};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0.0f64; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        LogConvError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        LogConvError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_wrong_length() {
    let data = [0.0f64; 3];

    let err = ImageView::from_slice(&data, 2, 2).err().unwrap();
    assert_eq!(
        err,
        LogConvError::BufferSizeMismatch {
            expected: 4,
            got: 3
        }
    );

    let data = [0.0f64; 5];
    let err = ImageView::from_slice(&data, 2, 2).err().unwrap();
    assert_eq!(
        err,
        LogConvError::BufferSizeMismatch {
            expected: 4,
            got: 5
        }
    );
}

#[test]
fn gray_image_requires_exact_length() {
    let err = GrayImage::new(vec![0.0; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        LogConvError::BufferSizeMismatch {
            expected: 4,
            got: 5
        }
    );

    let img = GrayImage::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
    let view = img.view();
    assert_eq!(view.width(), 2);
    assert_eq!(view.height(), 2);
    assert_eq!(view.row(1).unwrap(), &[3.0, 4.0]);
}

#[test]
fn output_buffer_shape_matches_data() {
    let buf = OutputBuffer::from_vec(vec![0.5; 6], 3, 2).unwrap();
    assert_eq!(buf.width(), 3);
    assert_eq!(buf.height(), 2);
    assert_eq!(buf.row(1).unwrap(), &[0.5, 0.5, 0.5]);
    assert!(buf.row(2).is_none());
    assert_eq!(buf.into_vec().len(), 6);
}

#[test]
fn kernel_rejects_non_finite_weights() {
    let mut weights = vec![0.0; 9];
    weights[4] = f64::INFINITY;
    let err = Kernel::from_vec(3, weights).err().unwrap();
    assert_eq!(err, LogConvError::NonFiniteValue { index: 4 });
}

#[test]
fn errors_render_readable_messages() {
    let err = LogConvError::InvalidKernelSize { size: 4 };
    assert_eq!(err.to_string(), "invalid kernel size 4: must be odd and positive");
    let err = LogConvError::ExecutionUnavailable {
        reason: "no pool".to_string(),
    };
    assert_eq!(err.to_string(), "accelerated execution unavailable: no pool");
}
