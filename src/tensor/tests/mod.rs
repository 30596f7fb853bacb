use ndarray::array;

use crate::tensor::{
    C32, abs_diff_eq, concat_real_imag, conj_transpose, is_hermitian, mat_mul_real,
    quadratic_form, to_complex,
};

#[test]
fn test_conj_transpose() {
    let m = array![
        [C32::new(1.0, 2.0), C32::new(3.0, -1.0)],
        [C32::new(0.0, 1.0), C32::new(4.0, 0.0)]
    ];
    let expected = array![
        [C32::new(1.0, -2.0), C32::new(0.0, -1.0)],
        [C32::new(3.0, 1.0), C32::new(4.0, 0.0)]
    ];
    assert_eq!(conj_transpose(&m), expected);
}

#[test]
fn test_is_hermitian() {
    let h = array![
        [C32::new(2.0, 0.0), C32::new(1.0, 1.0)],
        [C32::new(1.0, -1.0), C32::new(3.0, 0.0)]
    ];
    assert!(is_hermitian(&h));

    // 仅对称、不共轭
    let s = array![
        [C32::new(2.0, 0.0), C32::new(1.0, 1.0)],
        [C32::new(1.0, 1.0), C32::new(3.0, 0.0)]
    ];
    assert!(!is_hermitian(&s));

    let non_square = array![[C32::new(1.0, 0.0), C32::new(1.0, 0.0)]];
    assert!(!is_hermitian(&non_square));
}

#[test]
fn test_concat_real_imag() {
    let m = array![[C32::new(1.0, 2.0)], [C32::new(-3.0, 4.0)]];
    let expected = array![[1.0, 2.0], [-3.0, 4.0]];
    assert_eq!(concat_real_imag(&m), expected);
}

#[test]
fn test_mat_mul_real() {
    let x = array![[C32::new(1.0, 1.0), C32::new(2.0, 0.0)]];
    let w = array![[1.0, 0.0, 2.0], [0.0, 1.0, 1.0]];
    let y = mat_mul_real(&x, &w, "测试").unwrap();
    let expected = array![[
        C32::new(1.0, 1.0),
        C32::new(2.0, 0.0),
        C32::new(4.0, 2.0)
    ]];
    assert!(abs_diff_eq(&y, &expected, 1e-6));

    let bad = array![[1.0, 0.0]];
    assert!(mat_mul_real(&x, &bad, "测试").is_err());
}

#[test]
fn test_quadratic_form() {
    // 对角阵的二次型就是加权模长平方和
    let m = to_complex(&array![[2.0, 0.0], [0.0, 3.0]]);
    let x = [C32::new(1.0, 1.0), C32::new(0.0, 2.0)];
    assert!((quadratic_form(&m, &x) - (2.0 * 2.0 + 3.0 * 4.0)).abs() < 1e-6);
}
